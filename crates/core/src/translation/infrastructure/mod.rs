pub mod openai_translator;
