//! WAV 编码
//!
//! 标准 44 字节 RIFF/WAVE 头 + 小端 16 位单声道 PCM

use thiserror::Error;

/// WAV 头长度（字节）
pub const WAV_HEADER_LEN: usize = 44;

const BITS_PER_SAMPLE: u16 = 16;
const NUM_CHANNELS: u16 = 1;

#[derive(Debug, Error)]
pub enum WavEncodeError {
    #[error("PCM payload of {0} bytes exceeds the WAV size limit")]
    TooLarge(usize),

    #[error("Invalid sample rate: {0}")]
    InvalidSampleRate(u32),
}

/// 将单声道 i16 样本编码为 WAV
pub fn encode_wav(samples: &[i16], sample_rate: u32) -> Result<Vec<u8>, WavEncodeError> {
    if sample_rate == 0 {
        return Err(WavEncodeError::InvalidSampleRate(sample_rate));
    }

    let bytes_per_sample = (BITS_PER_SAMPLE / 8) as u32;
    let byte_rate = sample_rate * NUM_CHANNELS as u32 * bytes_per_sample;
    let block_align = NUM_CHANNELS * (BITS_PER_SAMPLE / 8);

    let data_size = samples.len() * 2;
    // RIFF 大小字段 = 36 + data_size，必须放得进 u32
    let file_size = u32::try_from(data_size)
        .ok()
        .and_then(|size| size.checked_add(36))
        .ok_or(WavEncodeError::TooLarge(data_size))?;

    let mut wav = Vec::with_capacity(WAV_HEADER_LEN + data_size);

    // RIFF header
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&file_size.to_le_bytes());
    wav.extend_from_slice(b"WAVE");

    // fmt chunk
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes()); // chunk size
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM format
    wav.extend_from_slice(&NUM_CHANNELS.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    // data chunk
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&(data_size as u32).to_le_bytes());

    for sample in samples {
        wav.extend_from_slice(&sample.to_le_bytes());
    }

    Ok(wav)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_u32(data: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]])
    }

    fn read_u16(data: &[u8], offset: usize) -> u16 {
        u16::from_le_bytes([data[offset], data[offset + 1]])
    }

    #[test]
    fn test_header_layout() {
        let wav = encode_wav(&[1, -1, 2], 24_000).unwrap();

        assert_eq!(wav.len(), WAV_HEADER_LEN + 6);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(read_u32(&wav, 4), 36 + 6);
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(read_u32(&wav, 16), 16);
        assert_eq!(read_u16(&wav, 20), 1); // PCM
        assert_eq!(read_u16(&wav, 22), 1); // mono
        assert_eq!(read_u32(&wav, 24), 24_000);
        assert_eq!(read_u32(&wav, 28), 48_000);
        assert_eq!(read_u16(&wav, 32), 2);
        assert_eq!(read_u16(&wav, 34), 16);
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(read_u32(&wav, 40), 6);
    }

    #[test]
    fn test_samples_are_little_endian() {
        let wav = encode_wav(&[0x0102, -2], 24_000).unwrap();
        assert_eq!(&wav[44..46], &[0x02, 0x01]);
        assert_eq!(&wav[46..48], &(-2i16).to_le_bytes());
    }

    #[test]
    fn test_zero_sample_rate_rejected() {
        assert!(matches!(
            encode_wav(&[0], 0),
            Err(WavEncodeError::InvalidSampleRate(0))
        ));
    }
}
