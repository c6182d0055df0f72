use clap::Subcommand;

use crate::db;

#[derive(Subcommand)]
pub enum AdminCommands {
    #[command(about = "Set a user's role by username")]
    SetRole {
        #[arg(long)]
        username: String,

        #[arg(long)]
        role: String,
    },

    #[command(about = "Print a bcrypt hash, e.g. for provisioning share link passwords")]
    HashPassword { password: String },
}

pub async fn handle(cmd: AdminCommands) -> anyhow::Result<()> {
    match cmd {
        AdminCommands::SetRole { username, role } => {
            let pool = db::connect().await?;
            let updated = db::users::set_role(&pool, &username, &role).await?;
            anyhow::ensure!(updated, "no user named {username}");
            println!("role of {username} set to {role}");
        }
        AdminCommands::HashPassword { password } => {
            println!("{}", bcrypt::hash(password.as_bytes(), bcrypt::DEFAULT_COST)?);
        }
    }

    Ok(())
}
