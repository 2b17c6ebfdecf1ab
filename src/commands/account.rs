//! Session and registration commands.

use clap::{Args, Subcommand};

use tastylog::{AppContext, SessionGateway};

#[derive(Args)]
pub struct AccountCommand {
    #[command(subcommand)]
    pub command: AccountSubcommand,
}

#[derive(Subcommand)]
pub enum AccountSubcommand {
    /// Create an account, log in and seed the journal
    Register {
        email: String,

        /// Display name
        #[arg(long, short)]
        name: String,

        #[arg(long, short)]
        password: String,
    },

    /// Open an email/password session
    Login {
        email: String,

        #[arg(long, short)]
        password: String,
    },

    /// Close the current session
    Logout,

    /// Show the account behind the current session
    Whoami,
}

impl AccountCommand {
    pub async fn run(&self, ctx: &AppContext) -> Result<(), Box<dyn std::error::Error>> {
        let gateway = SessionGateway::new(ctx);

        match &self.command {
            AccountSubcommand::Register {
                email,
                name,
                password,
            } => {
                let registration = gateway.register(email, password, name).await?;
                println!("Registered account {}", registration.user_id);

                // Reuse the bootstrap session rather than opening a second one
                match registration.session {
                    Some(session) if !session.secret.is_empty() => {
                        super::store_session(&session.secret)?;
                        println!("Logged in as {}", session.user_id);
                    }
                    Some(_) => {
                        println!("Warning: no session secret returned; log in again later");
                    }
                    None => {
                        println!("Auto-login failed; run `tastylog account login`");
                    }
                }
            }
            AccountSubcommand::Login { email, password } => {
                let session = gateway.login(email, password).await?;
                if session.secret.is_empty() {
                    println!("Warning: no session secret returned; session will not persist");
                } else {
                    super::store_session(&session.secret)?;
                }
                println!("Logged in as {}", session.user_id);
            }
            AccountSubcommand::Logout => {
                gateway.logout().await?;
                super::clear_session();
                println!("Logged out");
            }
            AccountSubcommand::Whoami => match gateway.current_identity().await {
                Some(user) => println!("{} <{}> ({})", user.name, user.email, user.id),
                None => println!("Not logged in"),
            },
        }

        Ok(())
    }
}
