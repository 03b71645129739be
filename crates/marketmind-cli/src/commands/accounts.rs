use anyhow::Result;
use colored::Colorize;
use marketmind_application::SocialAccountService;
use marketmind_infrastructure::ConfigService;

pub async fn run(config_service: &ConfigService) -> Result<()> {
    let config = config_service.load()?;
    let accounts = SocialAccountService::new(config.accounts);

    for account in accounts.list().await {
        let state = if account.connected {
            "connected".green()
        } else {
            "not connected".dimmed()
        };
        println!("{:<10} {:<20} {}", account.platform, account.handle, state);
    }

    Ok(())
}
