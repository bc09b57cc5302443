//! Interactive shell command parsing.
//!
//! One line of input becomes one [`Action`], or a local shell command.

use crate::app::Action;
use crate::models::SearchType;
use crate::view::{ActiveView, ProfileTab};

/// A parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Action(Action),
    Help,
    /// Redraw the current screen
    Show,
    Quit,
    Empty,
}

pub const SHELL_HELP: &str = "\
Commands:
  login <username> <password>         register <username> <email> <password>
  toggle                              logout
  go <search|profile|activity|recommendations>
  refresh                             show
  type <artist|album>                 search <query>
  find <username>                     user <username>
  open <n>                            close
  rate <1-5>                          review [text]
  delete-review                       favorite
  tab <favorites|reviews>             followers | following
  follow [user id]                    unfollow [user id]
  edit                                save-profile <bio> | <picture url>
  cancel                              help | quit";

/// Parse one input line.
pub fn parse_line(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(ShellCommand::Empty);
    }
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let action = match command.to_ascii_lowercase().as_str() {
        "help" | "?" => return Ok(ShellCommand::Help),
        "show" | "ls" => return Ok(ShellCommand::Show),
        "quit" | "exit" | "q" => return Ok(ShellCommand::Quit),

        "login" => {
            let [username, password] = words::<2>(rest, "login <username> <password>")?;
            Action::Login { username, password }
        }
        "register" => {
            let [username, email, password] =
                words::<3>(rest, "register <username> <email> <password>")?;
            Action::Register {
                username,
                email,
                password,
            }
        }
        "toggle" => Action::ToggleAuthForm,
        "logout" => Action::Logout,

        "go" => Action::Navigate(rest.parse::<ActiveView>()?),
        "refresh" => Action::Refresh,

        "type" => Action::SetSearchType(rest.parse::<SearchType>()?),
        "search" => Action::Search {
            query: rest.to_string(),
        },
        "find" => Action::SearchUser {
            username: rest.to_string(),
        },
        "user" => Action::ViewUser {
            username: required(rest, "user <username>")?,
        },

        "open" => Action::OpenAlbum {
            index: position(rest)?,
        },
        "close" => Action::CloseAlbum,
        "rate" => Action::SelectRating(
            rest.parse::<u8>()
                .map_err(|_| "usage: rate <1-5>".to_string())?,
        ),
        "review" => Action::SubmitReview {
            text: rest.to_string(),
        },
        "delete-review" => Action::DeleteReview,
        "favorite" | "fav" => Action::AddFavorite,

        "tab" => Action::SelectProfileTab(rest.parse::<ProfileTab>()?),
        "followers" => Action::ShowFollowers,
        "following" => Action::ShowFollowing,
        "follow" => Action::Follow {
            user_id: optional(rest),
        },
        "unfollow" => Action::Unfollow {
            user_id: optional(rest),
        },
        "edit" => Action::EditProfile,
        "save-profile" => {
            let (bio, picture) = rest.split_once('|').unwrap_or((rest, ""));
            Action::UpdateProfile {
                bio: bio.trim().to_string(),
                picture: picture.trim().to_string(),
            }
        }
        "cancel" => Action::CancelEdit,

        other => return Err(format!("unknown command '{}' (try 'help')", other)),
    };
    Ok(ShellCommand::Action(action))
}

fn words<const N: usize>(rest: &str, usage: &str) -> Result<[String; N], String> {
    let parts: Vec<String> = rest.split_whitespace().map(str::to_string).collect();
    parts
        .try_into()
        .map_err(|_| format!("usage: {}", usage))
}

fn required(rest: &str, usage: &str) -> Result<String, String> {
    if rest.is_empty() {
        Err(format!("usage: {}", usage))
    } else {
        Ok(rest.to_string())
    }
}

fn optional(rest: &str) -> Option<String> {
    (!rest.is_empty()).then(|| rest.to_string())
}

/// 1-based position on screen to 0-based index.
fn position(rest: &str) -> Result<usize, String> {
    match rest.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err("usage: open <n> (n from the list on screen)".to_string()),
    }
}
