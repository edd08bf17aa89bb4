use gearshelf_core::error::Error;

/// Best-effort clipboard write. Failures are reported to the caller as a
/// `Clipboard` error so they can degrade to a printed notice.
pub fn copy(text: &str) -> Result<(), Error> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|err| Error::Clipboard(err.to_string()))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|err| Error::Clipboard(err.to_string()))
}
