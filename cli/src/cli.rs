// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, path::PathBuf};

use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use futures::{FutureExt, future::BoxFuture};
use plancal_core::{APP_NAME, Planner};

use crate::cmd_calendar::{CmdBacklog, CmdCalendar};
use crate::cmd_category::{CmdCategoryDelete, CmdCategoryList, CmdCategoryNew, CmdCategoryRename};
use crate::cmd_content::{
    CmdContentDelete, CmdContentEdit, CmdContentList, CmdContentNew, CmdContentShow,
};
use crate::cmd_dashboard::CmdDashboard;
use crate::cmd_generate_completion::CmdGenerateCompletion;
use crate::cmd_schedule::{CmdAdvance, CmdSchedule, CmdUnschedule};
use crate::cmd_session::{CmdLogin, CmdLogout};
use crate::cmd_toplevel::CmdFlush;
use crate::config::parse_config;

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Plan content through its production stages on a monthly calendar.")
            .author("Zexin Yuan <aim@yzx9.xyz>")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(false) // allow default to dashboard
            .arg_required_else_help(false)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $XDG_CONFIG_HOME/plancal/config.toml on Linux and MacOS, \
%LOCALAPPDATA%/plancal/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .subcommand(CmdDashboard::command())
            .subcommand(CmdCalendar::command())
            .subcommand(CmdBacklog::command())
            .subcommand(
                Command::new("category")
                    .alias("cat")
                    .about("Manage your categories")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdCategoryNew::command())
                    .subcommand(CmdCategoryList::command())
                    .subcommand(CmdCategoryRename::command())
                    .subcommand(CmdCategoryDelete::command()),
            )
            .subcommand(
                Command::new("content")
                    .alias("c")
                    .about("Manage your content items")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdContentNew::command())
                    .subcommand(CmdContentEdit::command())
                    .subcommand(CmdContentShow::command())
                    .subcommand(CmdContentDelete::command())
                    .subcommand(CmdContentList::command()),
            )
            .subcommand(CmdSchedule::command())
            .subcommand(CmdUnschedule::command())
            .subcommand(CmdAdvance::command())
            .subcommand(CmdLogin::command())
            .subcommand(CmdLogout::command())
            .subcommand(CmdFlush::command())
            .subcommand(CmdGenerateCompletion::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some((CmdDashboard::NAME, matches)) => Dashboard(CmdDashboard::from(matches)),
            Some((CmdCalendar::NAME, matches)) => Calendar(CmdCalendar::from(matches)),
            Some((CmdBacklog::NAME, matches)) => Backlog(CmdBacklog::from(matches)),
            Some(("category", matches)) => match matches.subcommand() {
                Some((CmdCategoryNew::NAME, matches)) => CategoryNew(CmdCategoryNew::from(matches)),
                Some((CmdCategoryList::NAME, matches)) => {
                    CategoryList(CmdCategoryList::from(matches))
                }
                Some((CmdCategoryRename::NAME, matches)) => {
                    CategoryRename(CmdCategoryRename::from(matches))
                }
                Some((CmdCategoryDelete::NAME, matches)) => {
                    CategoryDelete(CmdCategoryDelete::from(matches))
                }
                _ => unreachable!(),
            },
            Some(("content", matches)) => match matches.subcommand() {
                Some((CmdContentNew::NAME, matches)) => ContentNew(CmdContentNew::from(matches)),
                Some((CmdContentEdit::NAME, matches)) => ContentEdit(CmdContentEdit::from(matches)),
                Some((CmdContentShow::NAME, matches)) => ContentShow(CmdContentShow::from(matches)),
                Some((CmdContentDelete::NAME, matches)) => {
                    ContentDelete(CmdContentDelete::from(matches))
                }
                Some((CmdContentList::NAME, matches)) => ContentList(CmdContentList::from(matches)),
                _ => unreachable!(),
            },
            Some((CmdSchedule::NAME, matches)) => Schedule(CmdSchedule::from(matches)),
            Some((CmdUnschedule::NAME, matches)) => Unschedule(CmdUnschedule::from(matches)),
            Some((CmdAdvance::NAME, matches)) => Advance(CmdAdvance::from(matches)),
            Some((CmdLogin::NAME, matches)) => Login(CmdLogin::from(matches)),
            Some((CmdLogout::NAME, matches)) => Logout(CmdLogout::from(matches)),
            Some((CmdFlush::NAME, matches)) => Flush(CmdFlush::from(matches)),
            Some((CmdGenerateCompletion::NAME, matches)) => {
                GenerateCompletion(CmdGenerateCompletion::from(matches))
            }
            None => Dashboard(CmdDashboard),
            _ => unreachable!(),
        };

        let config = matches.get_one("config").cloned();
        Ok(Cli { config, command })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Show the dashboard
    Dashboard(CmdDashboard),

    /// Show a month grid
    Calendar(CmdCalendar),

    /// List unscheduled content
    Backlog(CmdBacklog),

    /// Add a category
    CategoryNew(CmdCategoryNew),

    /// List categories
    CategoryList(CmdCategoryList),

    /// Rename a category
    CategoryRename(CmdCategoryRename),

    /// Delete categories
    CategoryDelete(CmdCategoryDelete),

    /// Add a content item
    ContentNew(CmdContentNew),

    /// Edit a content item
    ContentEdit(CmdContentEdit),

    /// Show a content item
    ContentShow(CmdContentShow),

    /// Delete content items
    ContentDelete(CmdContentDelete),

    /// List content items
    ContentList(CmdContentList),

    /// Put a content item on a publish date
    Schedule(CmdSchedule),

    /// Move content items back to the backlog
    Unschedule(CmdUnschedule),

    /// Move content items to their next stage
    Advance(CmdAdvance),

    /// Sign in to the remote backend
    Login(CmdLogin),

    /// Sign out of the remote backend
    Logout(CmdLogout),

    /// Forget all short ids
    Flush(CmdFlush),

    /// Generate shell completion
    GenerateCompletion(CmdGenerateCompletion),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            Dashboard(a)      => Self::run_with(config, |x| a.run(x).boxed()).await,
            Calendar(a)       => Self::run_with(config, |x| a.run(x).boxed()).await,
            Backlog(a)        => Self::run_with(config, |x| a.run(x).boxed()).await,
            CategoryNew(a)    => Self::run_with(config, |x| a.run(x).boxed()).await,
            CategoryList(a)   => Self::run_with(config, |x| a.run(x).boxed()).await,
            CategoryRename(a) => Self::run_with(config, |x| a.run(x).boxed()).await,
            CategoryDelete(a) => Self::run_with(config, |x| a.run(x).boxed()).await,
            ContentNew(a)     => Self::run_with(config, |x| a.run(x).boxed()).await,
            ContentEdit(a)    => Self::run_with(config, |x| a.run(x).boxed()).await,
            ContentShow(a)    => Self::run_with(config, |x| a.run(x).boxed()).await,
            ContentDelete(a)  => Self::run_with(config, |x| a.run(x).boxed()).await,
            ContentList(a)    => Self::run_with(config, |x| a.run(x).boxed()).await,
            Schedule(a)       => Self::run_with(config, |x| a.run(x).boxed()).await,
            Unschedule(a)     => Self::run_with(config, |x| a.run(x).boxed()).await,
            Advance(a)        => Self::run_with(config, |x| a.run(x).boxed()).await,
            Flush(a)          => Self::run_with(config, |x| a.run(x).boxed()).await,
            Login(a)          => a.run(parse_config(config).await?).await,
            Logout(a)         => a.run(parse_config(config).await?).await,
            GenerateCompletion(a) => a.run(),
        }
    }

    async fn run_with<F>(config: Option<PathBuf>, f: F) -> Result<(), Box<dyn Error>>
    where
        F: for<'a> FnOnce(&'a Planner) -> BoxFuture<'a, Result<(), Box<dyn Error>>>,
    {
        tracing::debug!("parsing configuration...");
        let core_config = parse_config(config).await?;
        let planner = Planner::new(core_config).await?;

        let result = f(&planner).await;
        planner.close().await?;
        result
    }
}

#[cfg(test)]
mod tests {
    use plancal_core::{Id, Stage};

    use super::*;
    use crate::cmd_generate_completion::Shell;
    use crate::util::OutputFormat;

    #[test]
    fn test_parse_config() {
        let cli = Cli::try_parse_from(vec!["test", "-c", "/tmp/config.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/config.toml")));
        assert!(matches!(cli.command, Commands::Dashboard(_)));
    }

    #[test]
    fn test_parse_default_dashboard() {
        let cli = Cli::try_parse_from(vec!["test"]).unwrap();
        assert!(matches!(cli.command, Commands::Dashboard(_)));
    }

    #[test]
    fn test_parse_dashboard() {
        let cli = Cli::try_parse_from(vec!["test", "dashboard"]).unwrap();
        assert!(matches!(cli.command, Commands::Dashboard(_)));
    }

    #[test]
    fn test_parse_calendar() {
        let cli = Cli::try_parse_from(vec!["test", "calendar", "--month", "next"]).unwrap();
        match cli.command {
            Commands::Calendar(cmd) => assert_eq!(cmd.month.as_deref(), Some("next")),
            _ => panic!("Expected Calendar command"),
        }
    }

    #[test]
    fn test_parse_backlog() {
        let cli = Cli::try_parse_from(vec!["test", "backlog", "--category", "2"]).unwrap();
        match cli.command {
            Commands::Backlog(cmd) => {
                assert_eq!(cmd.category, Some(Id::ShortIdOrUid("2".to_string())));
            }
            _ => panic!("Expected Backlog command"),
        }
    }

    #[test]
    fn test_parse_category_new() {
        let cli = Cli::try_parse_from(vec!["test", "category", "new", "Cooking"]).unwrap();
        match cli.command {
            Commands::CategoryNew(cmd) => assert_eq!(cmd.name, "Cooking"),
            _ => panic!("Expected CategoryNew command"),
        }
    }

    #[test]
    fn test_parse_category_list() {
        let args = vec!["test", "cat", "ls", "--output-format", "json"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::CategoryList(cmd) => assert_eq!(cmd.output_format, OutputFormat::Json),
            _ => panic!("Expected CategoryList command"),
        }
    }

    #[test]
    fn test_parse_content_new() {
        let args = vec!["test", "content", "add", "Pasta", "--category", "1"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::ContentNew(cmd) => {
                assert_eq!(cmd.name, "Pasta");
                assert_eq!(cmd.category, Id::ShortIdOrUid("1".to_string()));
            }
            _ => panic!("Expected ContentNew command"),
        }
    }

    #[test]
    fn test_parse_content_edit() {
        let args = vec!["test", "c", "edit", "3", "--stage", "editing"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::ContentEdit(cmd) => {
                assert_eq!(cmd.id, Id::ShortIdOrUid("3".to_string()));
                assert_eq!(cmd.stage, Some(Stage::Editing));
            }
            _ => panic!("Expected ContentEdit command"),
        }
    }

    #[test]
    fn test_parse_content_show_and_delete() {
        let cli = Cli::try_parse_from(vec!["test", "content", "show", "3"]).unwrap();
        assert!(matches!(cli.command, Commands::ContentShow(_)));

        let cli = Cli::try_parse_from(vec!["test", "content", "rm", "3", "4"]).unwrap();
        match cli.command {
            Commands::ContentDelete(cmd) => assert_eq!(cmd.ids.len(), 2),
            _ => panic!("Expected ContentDelete command"),
        }
    }

    #[test]
    fn test_parse_content_list() {
        let args = vec!["test", "content", "list", "--scheduled", "-v"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::ContentList(cmd) => {
                assert_eq!(cmd.scheduled, Some(true));
                assert!(cmd.verbose);
            }
            _ => panic!("Expected ContentList command"),
        }
    }

    #[test]
    fn test_parse_content_requires_subcommand() {
        assert!(Cli::try_parse_from(vec!["test", "content"]).is_err());
    }

    #[test]
    fn test_parse_schedule() {
        let cli = Cli::try_parse_from(vec!["test", "schedule", "1", "2026-11-02"]).unwrap();
        match cli.command {
            Commands::Schedule(cmd) => {
                assert_eq!(cmd.id, Id::ShortIdOrUid("1".to_string()));
                assert_eq!(cmd.date, "2026-11-02");
            }
            _ => panic!("Expected Schedule command"),
        }
    }

    #[test]
    fn test_parse_unschedule() {
        let cli = Cli::try_parse_from(vec!["test", "unschedule", "1", "2"]).unwrap();
        match cli.command {
            Commands::Unschedule(cmd) => {
                assert_eq!(
                    cmd.ids,
                    vec![
                        Id::ShortIdOrUid("1".to_string()),
                        Id::ShortIdOrUid("2".to_string())
                    ]
                );
            }
            _ => panic!("Expected Unschedule command"),
        }
    }

    #[test]
    fn test_parse_advance() {
        let cli = Cli::try_parse_from(vec!["test", "advance", "5"]).unwrap();
        assert!(matches!(cli.command, Commands::Advance(_)));
    }

    #[test]
    fn test_parse_login_logout() {
        let args = vec!["test", "login", "--email", "me@example.com", "--password", "pw"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(cli.command, Commands::Login(_)));

        let cli = Cli::try_parse_from(vec!["test", "logout"]).unwrap();
        assert!(matches!(cli.command, Commands::Logout(_)));
    }

    #[test]
    fn test_parse_flush() {
        let cli = Cli::try_parse_from(vec!["test", "flush"]).unwrap();
        assert!(matches!(cli.command, Commands::Flush(_)));
    }

    #[test]
    fn test_parse_generate_completions() {
        let args = vec!["test", "generate-completion", "zsh"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::GenerateCompletion(cmd) => assert_eq!(cmd.shell, Shell::Zsh),
            _ => panic!("Expected GenerateCompletion command"),
        }
    }
}
