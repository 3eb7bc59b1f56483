use std::path::Path;

use ffmpeg_next::format::sample::Type as SampleLayout;
use ffmpeg_next::format::Sample;
use ffmpeg_next::software::resampling;
use ffmpeg_next::util::frame::audio::Audio;
use ffmpeg_next::{codec, decoder, media, ChannelLayout};

use crate::audio::domain::audio_segment::AudioSegment;
use crate::video::domain::audio_reader::AudioReader;

/// Decodes and resamples a media file's best audio stream to mono f32
/// using ffmpeg-next.
pub struct FfmpegAudioReader;

impl AudioReader for FfmpegAudioReader {
    fn read_audio(
        &self,
        path: &Path,
        target_sample_rate: u32,
    ) -> Result<Option<AudioSegment>, Box<dyn std::error::Error>> {
        ffmpeg_next::init()?;

        let mut ictx = ffmpeg_next::format::input(path)?;
        let Some(stream) = ictx.streams().best(media::Type::Audio) else {
            log::warn!("{} has no audio track", path.display());
            return Ok(None);
        };
        let stream_index = stream.index();

        let mut decoder = codec::context::Context::from_parameters(stream.parameters())?
            .decoder()
            .audio()?;
        let mut resampler = resampling::Context::get(
            decoder.format(),
            decoder.channel_layout(),
            decoder.rate(),
            Sample::F32(SampleLayout::Planar),
            ChannelLayout::MONO,
            target_sample_rate,
        )?;

        let mut samples: Vec<f32> = Vec::new();
        for (stream, packet) in ictx.packets() {
            if stream.index() != stream_index {
                continue;
            }
            decoder.send_packet(&packet)?;
            drain_decoder(&mut decoder, &mut resampler, &mut samples)?;
        }

        decoder.send_eof()?;
        drain_decoder(&mut decoder, &mut resampler, &mut samples)?;

        // The resampler may still hold buffered output.
        let mut tail = Audio::empty();
        if let Ok(Some(delay)) = resampler.flush(&mut tail) {
            if delay.output > 0 {
                append_mono_f32(&tail, &mut samples);
            }
        }

        log::debug!(
            "Decoded {} samples at {target_sample_rate} Hz from {}",
            samples.len(),
            path.display()
        );
        Ok(Some(AudioSegment::new(samples, target_sample_rate, 1)))
    }
}

fn drain_decoder(
    decoder: &mut decoder::Audio,
    resampler: &mut resampling::Context,
    out: &mut Vec<f32>,
) -> Result<(), ffmpeg_next::Error> {
    let mut decoded = Audio::empty();
    let mut resampled = Audio::empty();
    while decoder.receive_frame(&mut decoded).is_ok() {
        resampler.run(&decoded, &mut resampled)?;
        append_mono_f32(&resampled, out);
    }
    Ok(())
}

/// Appends the samples of a planar mono f32 frame.
fn append_mono_f32(frame: &Audio, out: &mut Vec<f32>) {
    let count = frame.samples();
    if count == 0 {
        return;
    }
    let plane = frame.data(0);
    // SAFETY: the resampler outputs F32 planar mono, so plane 0 holds at
    // least `count` contiguous f32 values.
    let floats = unsafe { std::slice::from_raw_parts(plane.as_ptr() as *const f32, count) };
    out.extend_from_slice(floats);
}
