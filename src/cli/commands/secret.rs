use crate::cli::SecretAction;
use crate::config::ConfigManager;
use crate::error::ChainPilotResult;

pub async fn handle_secret(action: SecretAction) -> ChainPilotResult<()> {
    let manager = ConfigManager::new()?;
    let mut config = manager.load()?;

    let secret = match action {
        SecretAction::Show => manager.ensure_secret(&mut config)?,
        SecretAction::Rotate => {
            let secret = manager.rotate_secret(&mut config)?;
            println!("🔐 Signing secret rotated.");
            secret
        }
    };

    println!("{}", secret.reveal());
    println!("Configure this secret in the agent backend to verify `X-Signature: sha256=<hex>` request signatures.");

    Ok(())
}
