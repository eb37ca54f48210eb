use anyhow::{bail, Context};
use dialoguer::Password;
use fairmove_core::{verify, HmacDigest, SecretKey};

pub async fn handle_verify_command(
    hmac: &str,
    chosen_move: &str,
    key: Option<String>,
) -> anyhow::Result<()> {
    let digest: HmacDigest = hmac.parse()?;

    let key = match key {
        Some(k) => k,
        None => Password::new()
            .with_prompt("Enter HMAC key")
            .interact()
            .context("failed to read key")?,
    };
    let key: SecretKey = key.parse()?;

    if !verify(&key, chosen_move, &digest) {
        bail!(
            "HMAC mismatch: key and move '{}' do not produce {}",
            chosen_move,
            digest
        );
    }

    println!("HMAC verified: '{}' was committed before your move", chosen_move);
    Ok(())
}
