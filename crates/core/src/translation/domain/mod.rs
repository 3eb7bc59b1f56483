pub mod translation_service;
pub mod translator;
