//! WAV encoding for the simulated microphone.

/// Bytes ahead of the PCM payload in the files `encode_mono16` produces.
pub const WAV_HEADER_SIZE: usize = 44;

const BYTES_PER_FRAME: u16 = 2;

/// Mono 16-bit PCM sine tone at half scale.
pub fn tone_pcm(sample_rate: u32, frequency_hz: f64, frames: usize) -> Vec<u8> {
    let step = frequency_hz * std::f64::consts::TAU / sample_rate as f64;
    (0..frames)
        .map(|i| ((i as f64 * step).sin() * 0.5 * i16::MAX as f64) as i16)
        .flat_map(i16::to_le_bytes)
        .collect()
}

/// Complete mono 16-bit little-endian WAV file around `pcm`.
pub fn encode_mono16(sample_rate: u32, pcm: &[u8]) -> Vec<u8> {
    let data_len = pcm.len() as u32;
    let mut file = Vec::with_capacity(WAV_HEADER_SIZE + pcm.len());

    file.extend_from_slice(b"RIFF");
    file.extend_from_slice(&(WAV_HEADER_SIZE as u32 - 8 + data_len).to_le_bytes());
    file.extend_from_slice(b"WAVE");

    // fmt chunk: PCM, one channel
    file.extend_from_slice(b"fmt ");
    file.extend_from_slice(&16u32.to_le_bytes());
    file.extend_from_slice(&1u16.to_le_bytes());
    file.extend_from_slice(&1u16.to_le_bytes());
    file.extend_from_slice(&sample_rate.to_le_bytes());
    file.extend_from_slice(&(sample_rate * BYTES_PER_FRAME as u32).to_le_bytes());
    file.extend_from_slice(&BYTES_PER_FRAME.to_le_bytes());
    file.extend_from_slice(&(BYTES_PER_FRAME * 8).to_le_bytes());

    file.extend_from_slice(b"data");
    file.extend_from_slice(&data_len.to_le_bytes());
    file.extend_from_slice(pcm);
    file
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u16_at(file: &[u8], at: usize) -> u16 {
        u16::from_le_bytes([file[at], file[at + 1]])
    }

    fn u32_at(file: &[u8], at: usize) -> u32 {
        u32::from_le_bytes([file[at], file[at + 1], file[at + 2], file[at + 3]])
    }

    #[test]
    fn header_describes_mono_16bit_pcm() {
        let file = encode_mono16(16000, &vec![0u8; 3200]);

        assert_eq!(&file[0..4], b"RIFF");
        assert_eq!(&file[8..12], b"WAVE");
        assert_eq!(&file[12..16], b"fmt ");
        assert_eq!(&file[36..40], b"data");
        assert_eq!(u32_at(&file, 4), 36 + 3200);
        assert_eq!(u16_at(&file, 20), 1);
        assert_eq!(u16_at(&file, 22), 1);
        assert_eq!(u32_at(&file, 24), 16000);
        assert_eq!(u32_at(&file, 28), 32000);
        assert_eq!(u16_at(&file, 32), 2);
        assert_eq!(u16_at(&file, 34), 16);
    }

    #[test]
    fn tone_has_two_bytes_per_frame() {
        let pcm = tone_pcm(8000, 440.0, 800);
        assert_eq!(pcm.len(), 1600);
        assert_eq!(&pcm[0..2], &[0, 0]);
    }

    #[test]
    fn encoded_file_declares_payload_size() {
        let pcm = tone_pcm(8000, 440.0, 10);
        let file = encode_mono16(8000, &pcm);

        assert_eq!(file.len(), WAV_HEADER_SIZE + 20);
        assert_eq!(u32_at(&file, 40), 20);
        assert_eq!(&file[WAV_HEADER_SIZE..], pcm.as_slice());
    }
}
