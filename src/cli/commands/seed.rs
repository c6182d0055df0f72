use clap::Subcommand;

use crate::db;

/// Password for the seeded demo share link. Printed so operators can
/// exercise the verify flow.
const DEMO_SHARE_PASSWORD: &str = "demo1234";

#[derive(Subcommand)]
pub enum SeedCommands {
    #[command(about = "Insert the default service categories, skipping existing names")]
    Categories,

    #[command(about = "Populate demo rows (client, service, quote, contract, tokens) for a user")]
    Demo {
        #[arg(long, help = "Username that will own the demo rows")]
        username: String,
    },
}

pub async fn handle(cmd: SeedCommands) -> anyhow::Result<()> {
    let pool = db::connect().await?;
    db::migrate(&pool).await?;

    match cmd {
        SeedCommands::Categories => {
            let outcome = db::categories::seed_defaults(&pool).await?;
            println!(
                "categories: {} created, {} skipped",
                outcome.created, outcome.skipped
            );
        }
        SeedCommands::Demo { username } => {
            let user = db::users::find_or_create(&pool, &username, None, None).await?;
            if db::demo::has_demo_data(&pool, user.id).await? {
                println!("{username} already has demo data, nothing to do");
                return Ok(());
            }

            let hash = bcrypt::hash(DEMO_SHARE_PASSWORD, bcrypt::DEFAULT_COST)?;
            let owner_name = user.name.as_deref().unwrap_or(&username);
            let seed = db::demo::seed_for_user(&pool, user.id, owner_name, &hash).await?;

            println!("demo data for {username}:");
            println!("  contract id: {}", seed.contract_id);
            println!("  sign token:  {}", seed.sign_token);
            println!(
                "  share token: {} (password: {DEMO_SHARE_PASSWORD})",
                seed.share_token
            );
        }
    }

    Ok(())
}
