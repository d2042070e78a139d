//! User commands: register and list.

use crate::error::CliError;
use crate::utils::{format_timestamp, print_json, GlobalOptions, Session};
use clap::{Args, Subcommand};
use seatbook::{Database, LifecycleManager, User};

/// Register or list users.
#[derive(Subcommand)]
pub enum UserCommand {
    /// Register a user
    Add(AddUserCommand),

    /// List registered users
    List,
}

/// Register a user.
#[derive(Args)]
pub struct AddUserCommand {
    /// Email address (unique)
    #[arg(value_name = "EMAIL")]
    pub email: String,

    /// Full name used in notifications
    #[arg(long, value_name = "NAME")]
    pub name: String,

    /// Grant the loyalty discount right away
    #[arg(long)]
    pub vip: bool,
}

impl UserCommand {
    /// Execute the user command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        match self {
            UserCommand::Add(cmd) => cmd.execute(global),
            UserCommand::List => list_users(global),
        }
    }
}

impl AddUserCommand {
    fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut user = User::new(&self.email, &self.name)?;
        user.vip = self.vip;

        let mut session = Session::open(global)?;
        let user = LifecycleManager::new(&mut session.db, &session.ctx).register_user(user)?;

        if global.json() {
            print_json(&user)
        } else {
            if !global.quiet {
                println!("Registered {} <{}>", user.full_name, user.email);
            }
            Ok(())
        }
    }
}

fn list_users(global: &GlobalOptions) -> Result<(), CliError> {
    let session = Session::open(global)?;
    let users = Database::list_users(session.db.connection())?;

    if global.json() {
        return print_json(&users);
    }

    println!("EMAIL\tNAME\tBOOKINGS\tVIP\tREGISTERED");
    for user in &users {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            user.email,
            user.full_name,
            user.reservation_count,
            if user.vip { "yes" } else { "no" },
            format_timestamp(user.created_at),
        );
    }
    Ok(())
}
