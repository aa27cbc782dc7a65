//! WAV output read back through an independent decoder.

use std::fs::File;
use std::io::{BufWriter, Cursor};

use scream_backend_audio::generate;
use scream_encoding::{FileEncoder, WavEncoder};
use scream_spec::{PresetName, SynthParams};

#[test]
fn test_generated_wav_decodes() {
    let mut params = SynthParams::preset(PresetName::Robot);
    params.duration_seconds = 0.25;
    let pcm = generate(&params).unwrap();
    let expected: Vec<i16> = pcm
        .pcm
        .chunks_exact(2)
        .map(|b| i16::from_le_bytes([b[0], b[1]]))
        .collect();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("robot.wav");
    {
        let mut file = BufWriter::new(File::create(&path).unwrap());
        WavEncoder::new()
            .encode(
                &mut file,
                Box::new(Cursor::new(pcm.pcm.clone())),
                pcm.sample_rate,
                pcm.channels,
            )
            .unwrap();
    }

    let mut reader = hound::WavReader::open(&path).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 48000);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_format, hound::SampleFormat::Int);
    assert_eq!(reader.duration() as usize, pcm.num_samples);

    let samples: Vec<i16> = reader.samples::<i16>().map(Result::unwrap).collect();
    assert!(samples == expected);
}

#[test]
fn test_mono_wav_in_memory() {
    let pcm: Vec<u8> = [100i16, -100, 32767, -32768]
        .iter()
        .flat_map(|s| s.to_le_bytes())
        .collect();
    let mut out = Vec::new();
    WavEncoder::new()
        .encode(&mut out, Box::new(Cursor::new(pcm)), 22050, 1)
        .unwrap();

    let mut reader = hound::WavReader::new(Cursor::new(out)).unwrap();
    assert_eq!(reader.spec().channels, 1);
    assert_eq!(reader.spec().sample_rate, 22050);
    let samples: Vec<i16> = reader.samples::<i16>().map(Result::unwrap).collect();
    assert_eq!(samples, vec![100, -100, 32767, -32768]);
}
