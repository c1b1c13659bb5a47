use encoding_rs::WINDOWS_1252;
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::error::Result;

/// Read a text file as UTF-8, falling back to Windows-1252 for legacy extracts
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    Ok(decode_bytes(&bytes, path).into_owned())
}

fn decode_bytes<'a>(bytes: &'a [u8], path: &Path) -> Cow<'a, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text.strip_prefix('\u{feff}').unwrap_or(text)),
        Err(_) => {
            warn!(
                path = %path.display(),
                "File is not valid UTF-8, decoding as Windows-1252"
            );
            let (text, _, _) = WINDOWS_1252.decode(bytes);
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_utf8_passthrough() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(file, "\u{feff}City\nCañon City, CO\n")?;

        let text = read_text(file.path())?;
        assert_eq!(text, "City\nCañon City, CO\n");
        Ok(())
    }

    #[test]
    fn test_latin1_fallback() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"Ca\xf1on City, CO")?;

        let text = read_text(file.path())?;
        assert_eq!(text, "Cañon City, CO");
        Ok(())
    }
}
