use anyhow::Result;
use colored::Colorize;
use marketmind_infrastructure::ConfigService;

pub fn run(config_service: &ConfigService, init: bool) -> Result<()> {
    let paths = config_service.paths();
    let config_file = paths.config_file()?;
    let secret_file = paths.secret_file()?;

    println!("config: {}", config_file.display());
    println!("secret: {}", secret_file.display());

    if init {
        let created = !secret_file.exists();
        let secret_file = paths.ensure_secret_file()?;
        if created {
            println!(
                "{} {} (add your Gemini API key)",
                "Created".green(),
                secret_file.display()
            );
        } else {
            println!("{} already exists", secret_file.display());
        }
    }

    Ok(())
}
