// Voice transcription: multipart upload (`meta` JSON string + `file` audio)
// forwarded to the speech-to-text provider.

pub mod audio;
pub mod handlers;
pub mod meta;
