// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use colored::Colorize;
use plancal_core::{Config, login, logout};

const PLANCAL_PASSWORD_ENV: &str = "PLANCAL_PASSWORD";

#[derive(Clone)]
pub struct CmdLogin {
    pub email: String,
    pub password: Option<String>,
}

impl std::fmt::Debug for CmdLogin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CmdLogin")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

impl CmdLogin {
    pub const NAME: &str = "login";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Sign in to the remote backend")
            .arg(arg!(--email <EMAIL> "Email of the account").required(true))
            .arg(
                arg!(--password <PASSWORD> "Password of the account")
                    .env(PLANCAL_PASSWORD_ENV)
                    .hide_env_values(true),
            )
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            email: matches
                .get_one::<String>("email")
                .expect("email is required")
                .clone(),
            password: matches.get_one("password").cloned(),
        }
    }

    pub async fn run(self, config: Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "signing in...");
        let password = self.password.ok_or_else(|| {
            format!("Password required, pass --password or set ${PLANCAL_PASSWORD_ENV}")
        })?;

        let session = login(config, &self.email, &password).await?;
        let who = session
            .user
            .and_then(|a| a.email)
            .unwrap_or(self.email);
        println!("{} {who}", "Signed in as".green());
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CmdLogout;

impl CmdLogout {
    pub const NAME: &str = "logout";

    pub fn command() -> Command {
        Command::new(Self::NAME).about("Sign out of the remote backend and forget the session")
    }

    pub fn from(_matches: &ArgMatches) -> Self {
        Self
    }

    pub async fn run(self, config: Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!("signing out...");
        if logout(config).await? {
            println!("{}", "Signed out".green());
        } else {
            println!("{}", "Not signed in".italic());
        }
        Ok(())
    }
}
