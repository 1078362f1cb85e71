use crate::config::{Credentials, Settings};
use anyhow::Result;

/// Print who gists would be created as.
pub fn whoami(settings: &Settings) -> Result<()> {
    let credentials = Credentials::load_from(&settings.token_path)?;
    println!("{}", credentials);
    println!("Credentials: {}", settings.token_path.display());
    Ok(())
}
