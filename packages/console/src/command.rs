//! Console command parsing.

use kaiwa_shared::time::parse_timestamp;
use thiserror::Error;

/// Help text printed by the `help` command.
pub const HELP: &str = "\
Commands:
  user <name> <mobile>                      create a user
  group <user-id> <user-id> [<user-id>...]  create a group (first user is admin)
  message <content...>                      create a message
  send <message-id> <user-id> <group-id>    send a message to a group
  admin <approver-id> <user-id> <group-id>  transfer admin rights
  remove <user-id>                          remove a user from groups
  find <start> <end> <k>                    k-th latest message in (start, end)
  show <group-id>                           print a group as JSON
  help                                      show this help
  quit | exit                               leave the console

Times are Unix milliseconds or RFC 3339 (e.g. 2024-01-01T09:00:00+09:00).";

/// A parsed console command.
///
/// Ids are the handles printed by the console when the entity was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CreateUser { name: String, mobile: String },
    CreateGroup { user_ids: Vec<u64> },
    CreateMessage { content: String },
    Send { message_id: u64, user_id: u64, group_id: u64 },
    ChangeAdmin { approver_id: u64, user_id: u64, group_id: u64 },
    Remove { user_id: u64 },
    Find { start: i64, end: i64, k: usize },
    Show { group_id: u64 },
    Help,
    Quit,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0} (type 'help')")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Invalid number '{value}' for {field}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Invalid time '{0}' (expected Unix milliseconds or RFC 3339)")]
    InvalidTimestamp(String),
}

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (keyword, rest) = line
            .split_once(char::is_whitespace)
            .map(|(keyword, rest)| (keyword, rest.trim()))
            .unwrap_or((line, ""));
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match keyword.to_lowercase().as_str() {
            "user" => match args.as_slice() {
                [name, mobile] => Self::CreateUser {
                    name: name.to_string(),
                    mobile: mobile.to_string(),
                },
                _ => return Err(CommandError::Usage("user <name> <mobile>")),
            },
            "group" => {
                if args.len() < 2 {
                    return Err(CommandError::Usage(
                        "group <user-id> <user-id> [<user-id>...]",
                    ));
                }
                let user_ids = args
                    .iter()
                    .map(|arg| parse_id("user-id", arg))
                    .collect::<Result<Vec<_>, _>>()?;
                Self::CreateGroup { user_ids }
            }
            "message" => {
                if rest.is_empty() {
                    return Err(CommandError::Usage("message <content...>"));
                }
                Self::CreateMessage {
                    content: rest.to_string(),
                }
            }
            "send" => match args.as_slice() {
                [message, user, group] => Self::Send {
                    message_id: parse_id("message-id", message)?,
                    user_id: parse_id("user-id", user)?,
                    group_id: parse_id("group-id", group)?,
                },
                _ => return Err(CommandError::Usage("send <message-id> <user-id> <group-id>")),
            },
            "admin" => match args.as_slice() {
                [approver, user, group] => Self::ChangeAdmin {
                    approver_id: parse_id("approver-id", approver)?,
                    user_id: parse_id("user-id", user)?,
                    group_id: parse_id("group-id", group)?,
                },
                _ => {
                    return Err(CommandError::Usage(
                        "admin <approver-id> <user-id> <group-id>",
                    ));
                }
            },
            "remove" => match args.as_slice() {
                [user] => Self::Remove {
                    user_id: parse_id("user-id", user)?,
                },
                _ => return Err(CommandError::Usage("remove <user-id>")),
            },
            "find" => match args.as_slice() {
                [start, end, k] => Self::Find {
                    start: parse_time(start)?,
                    end: parse_time(end)?,
                    k: k.parse().map_err(|_| CommandError::InvalidNumber {
                        field: "k",
                        value: k.to_string(),
                    })?,
                },
                _ => return Err(CommandError::Usage("find <start> <end> <k>")),
            },
            "show" => match args.as_slice() {
                [group] => Self::Show {
                    group_id: parse_id("group-id", group)?,
                },
                _ => return Err(CommandError::Usage("show <group-id>")),
            },
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }
}

fn parse_id(field: &'static str, value: &str) -> Result<u64, CommandError> {
    value.parse().map_err(|_| CommandError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

fn parse_time(value: &str) -> Result<i64, CommandError> {
    parse_timestamp(value).ok_or_else(|| CommandError::InvalidTimestamp(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_blank_line() {
        // テスト項目: 空行はコマンドなしとして扱われる
        assert_eq!(Command::parse("   "), Ok(None));
    }

    #[test]
    fn test_parse_user() {
        // テスト項目: user コマンドを解釈できる
        assert_eq!(
            Command::parse("user Alex 111"),
            Ok(Some(Command::CreateUser {
                name: "Alex".to_string(),
                mobile: "111".to_string()
            }))
        );
        assert_eq!(
            Command::parse("user Alex"),
            Err(CommandError::Usage("user <name> <mobile>"))
        );
    }

    #[test]
    fn test_parse_group_ids() {
        // テスト項目: group コマンドはユーザー ID を順番通りに保持する
        assert_eq!(
            Command::parse("group 3 1 2"),
            Ok(Some(Command::CreateGroup {
                user_ids: vec![3, 1, 2]
            }))
        );
        assert_eq!(
            Command::parse("group 1 x"),
            Err(CommandError::InvalidNumber {
                field: "user-id",
                value: "x".to_string()
            })
        );
    }

    #[test]
    fn test_parse_message_keeps_spacing() {
        // テスト項目: message コマンドは本文の内部の空白を保持する
        assert_eq!(
            Command::parse("message  hello   world "),
            Ok(Some(Command::CreateMessage {
                content: "hello   world".to_string()
            }))
        );
        assert_eq!(
            Command::parse("message"),
            Err(CommandError::Usage("message <content...>"))
        );
    }

    #[test]
    fn test_parse_find_with_mixed_time_formats() {
        // テスト項目: find コマンドはミリ秒と RFC 3339 の両方を受け付ける
        assert_eq!(
            Command::parse("find 0 1970-01-01T09:00:01+09:00 2"),
            Ok(Some(Command::Find {
                start: 0,
                end: 1000,
                k: 2
            }))
        );
        assert_eq!(
            Command::parse("find soon 10 1"),
            Err(CommandError::InvalidTimestamp("soon".to_string()))
        );
    }

    #[test]
    fn test_parse_send_admin_remove_show() {
        // テスト項目: ID を取るコマンドを解釈できる
        assert_eq!(
            Command::parse("send 1 2 3"),
            Ok(Some(Command::Send {
                message_id: 1,
                user_id: 2,
                group_id: 3
            }))
        );
        assert_eq!(
            Command::parse("ADMIN 1 2 3"),
            Ok(Some(Command::ChangeAdmin {
                approver_id: 1,
                user_id: 2,
                group_id: 3
            }))
        );
        assert_eq!(
            Command::parse("remove 4"),
            Ok(Some(Command::Remove { user_id: 4 }))
        );
        assert_eq!(
            Command::parse("show 1"),
            Ok(Some(Command::Show { group_id: 1 }))
        );
    }

    #[test]
    fn test_parse_unknown_and_control_commands() {
        // テスト項目: 未知のコマンドはエラー、help/quit/exit は制御コマンド
        assert_eq!(
            Command::parse("dance"),
            Err(CommandError::Unknown("dance".to_string()))
        );
        assert_eq!(Command::parse("help"), Ok(Some(Command::Help)));
        assert_eq!(Command::parse("quit"), Ok(Some(Command::Quit)));
        assert_eq!(Command::parse("exit"), Ok(Some(Command::Quit)));
    }
}
