use crate::errors::AppError;

/// Audio containers the transcription provider accepts, keyed by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    M4a,
    Mp3,
    Wav,
    Webm,
    Ogg,
}

impl AudioFormat {
    /// Infers the format from a file name's extension, ignoring case.
    /// Runs before the upload body is read.
    pub fn from_file_name(file_name: &str) -> Result<Self, AppError> {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "m4a" => Ok(AudioFormat::M4a),
            "mp3" => Ok(AudioFormat::Mp3),
            "wav" => Ok(AudioFormat::Wav),
            "webm" => Ok(AudioFormat::Webm),
            "ogg" => Ok(AudioFormat::Ogg),
            _ => Err(AppError::UnsupportedMediaType(format!(
                "unsupported audio type: {file_name} (expected .m4a, .mp3, .wav, .webm or .ogg)"
            ))),
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            AudioFormat::M4a => "audio/mp4",
            AudioFormat::Mp3 => "audio/mpeg",
            AudioFormat::Wav => "audio/wav",
            AudioFormat::Webm => "audio/webm",
            AudioFormat::Ogg => "audio/ogg",
        }
    }
}
