use logos::{Lexer, Logos};
use thiserror::Error;

use crate::{
    builtins::BuiltinCommands,
    cmd::execution_plan::{BuiltinInvocation, Command, CommandPlan, Stage},
    config::Limits,
    wildcard::{self, EntrySource, GlobError},
};

use self::token::{LexerError, Token};

pub mod token;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandParseError {
    #[error("failed to tokenize command: {0}")]
    Lexer(#[from] LexerError),
    #[error("syntax error: `{0}` needs a file name")]
    MissingRedirectTarget(&'static str),
    #[error("syntax error: only one `|` is supported per line")]
    UnsupportedPipelineDepth,
    #[error("syntax error: missing command")]
    MissingCommand,
    #[error("syntax error: missing command after `|`")]
    EmptyPipelineStage,
    #[error("line is {len} bytes long, the limit is {limit}")]
    LineTooLong { len: usize, limit: usize },
    #[error("too many arguments ({count}), the limit is {limit}")]
    TooManyArguments { count: usize, limit: usize },
}

/// A parsed line plus any wildcard problems hit on the way. Those are not
/// fatal; the affected pattern simply expanded to nothing.
#[derive(Debug)]
pub struct ParsedLine {
    pub command: Command,
    pub diagnostics: Vec<GlobError>,
}

pub fn parse_command<S>(
    line: &str,
    entries: &S,
    limits: &Limits,
) -> Result<ParsedLine, CommandParseError>
where
    S: EntrySource + ?Sized,
{
    let body = line.strip_suffix('\n').unwrap_or(line);
    if body.len() > limits.max_line_length {
        return Err(CommandParseError::LineTooLong {
            len: body.len(),
            limit: limits.max_line_length,
        });
    }

    let mut tokens = Token::lexer(body);

    let mut first = Stage::default();
    let mut second = None::<Stage>;
    let mut diagnostics = Vec::new();
    let mut blank = true;

    while let Some(token) = tokens.next() {
        let token = token?;
        blank = false;

        match token {
            Token::Pipe => {
                if second.is_some() {
                    return Err(CommandParseError::UnsupportedPipelineDepth);
                }
                second = Some(Stage::default());
            }
            Token::Read => {
                let path = redirect_target(&mut tokens, "<")?;
                current(&mut first, &mut second).input = Some(path.into());
            }
            Token::Write => {
                let path = redirect_target(&mut tokens, ">")?;
                current(&mut first, &mut second).output = Some(path.into());
            }
            Token::Word(word) if wildcard::is_pattern(word) => {
                let matches = wildcard::expand(word, entries, |err| {
                    warn!("expanding {word:?}: {err}");
                    diagnostics.push(err);
                });
                push_args(current(&mut first, &mut second), matches, limits)?;
            }
            Token::Word(word) => {
                push_args(current(&mut first, &mut second), [word.to_owned()], limits)?;
            }
        }
    }

    if blank {
        return Ok(ParsedLine {
            command: Command::Empty,
            diagnostics,
        });
    }

    if first.args.is_empty() {
        return Err(CommandParseError::MissingCommand);
    }

    if matches!(&second, Some(stage) if stage.args.is_empty()) {
        return Err(CommandParseError::EmptyPipelineStage);
    }

    Ok(ParsedLine {
        command: complete(first, second),
        diagnostics,
    })
}

fn current<'s>(first: &'s mut Stage, second: &'s mut Option<Stage>) -> &'s mut Stage {
    match second {
        Some(stage) => stage,
        None => first,
    }
}

fn redirect_target<'a>(
    tokens: &mut Lexer<'a, Token<'a>>,
    operator: &'static str,
) -> Result<&'a str, CommandParseError> {
    match tokens.next() {
        Some(Ok(Token::Word(path))) => Ok(path),
        Some(Err(err)) => Err(err.into()),
        Some(Ok(_)) | None => Err(CommandParseError::MissingRedirectTarget(operator)),
    }
}

fn push_args(
    stage: &mut Stage,
    args: impl IntoIterator<Item = String>,
    limits: &Limits,
) -> Result<(), CommandParseError> {
    stage.args.extend(args);

    if stage.args.len() > limits.max_args {
        return Err(CommandParseError::TooManyArguments {
            count: stage.args.len(),
            limit: limits.max_args,
        });
    }

    Ok(())
}

fn complete(mut first: Stage, second: Option<Stage>) -> Command {
    let Some(builtin) = BuiltinCommands::from_name(&first.args[0]) else {
        return Command::External(CommandPlan { first, second });
    };

    if second.is_some() || first.has_redirects() {
        debug!("ignoring redirections and pipes for builtin {:?}", first.args[0]);
    }

    first.args.remove(0);

    Command::Builtin(BuiltinInvocation {
        builtin,
        args: first.args,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::{cd::Cd, exit::Exit, pwd::Pwd, which::Which};

    const ENTRIES: &[&str] = &["b.c", "a.c", ".hidden.c", "README"];

    fn parse(line: &str) -> Result<Command, CommandParseError> {
        parse_command(line, ENTRIES, &Limits::default()).map(|parsed| parsed.command)
    }

    fn external(line: &str) -> CommandPlan {
        match parse(line) {
            Ok(Command::External(plan)) => plan,
            other => panic!("expected external command, got {other:?}"),
        }
    }

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn plain_words_are_split_in_order() {
        for line in ["ls -l /tmp", "  ls   -l  /tmp  ", "ls -l /tmp\n", "ls\n-l /tmp"] {
            let plan = external(line);
            assert_eq!(plan.first.args, args(&["ls", "-l", "/tmp"]), "{line:?}");
            assert!(!plan.is_pipeline());
            assert!(!plan.first.has_redirects());
        }
    }

    #[test]
    fn blank_lines_are_empty() {
        assert_eq!(parse("").unwrap(), Command::Empty);
        assert_eq!(parse("   \n").unwrap(), Command::Empty);
    }

    #[test]
    fn redirects_bind_to_their_stage() {
        let plan = external("sort < in.txt > out.txt");
        assert_eq!(plan.first.args, args(&["sort"]));
        assert_eq!(plan.first.input, Some("in.txt".into()));
        assert_eq!(plan.first.output, Some("out.txt".into()));

        let plan = external("cat < in.txt | wc -l > count.txt");
        assert_eq!(plan.first.input, Some("in.txt".into()));
        assert_eq!(plan.first.output, None);

        let second = plan.second.unwrap();
        assert_eq!(second.args, args(&["wc", "-l"]));
        assert_eq!(second.output, Some("count.txt".into()));
        assert_eq!(second.input, None);
    }

    #[test]
    fn later_redirect_replaces_earlier() {
        let plan = external("echo hi > a > b");
        assert_eq!(plan.first.output, Some("b".into()));
    }

    #[test]
    fn redirect_without_target_is_an_error() {
        assert_eq!(
            parse("ls >"),
            Err(CommandParseError::MissingRedirectTarget(">"))
        );
        assert_eq!(
            parse("cat < | wc"),
            Err(CommandParseError::MissingRedirectTarget("<"))
        );
    }

    #[test]
    fn second_pipe_is_rejected() {
        assert_eq!(
            parse("a | b | c"),
            Err(CommandParseError::UnsupportedPipelineDepth)
        );
    }

    #[test]
    fn missing_commands() {
        assert_eq!(parse("> out"), Err(CommandParseError::MissingCommand));
        assert_eq!(parse("| wc"), Err(CommandParseError::MissingCommand));
        assert_eq!(parse("ls |"), Err(CommandParseError::EmptyPipelineStage));
        assert_eq!(parse("*.zip"), Err(CommandParseError::MissingCommand));
    }

    #[test]
    fn wildcards_expand_in_place() {
        let plan = external("cc -o out *.c main.rs");
        assert_eq!(plan.first.args, args(&["cc", "-o", "out", "a.c", "b.c", "main.rs"]));

        let plan = external("ls *.zip -a");
        assert_eq!(plan.first.args, args(&["ls", "-a"]));

        let plan = external("cat README | grep ?.c");
        assert_eq!(plan.second.unwrap().args, args(&["grep", "a.c", "b.c"]));
    }

    #[test]
    fn wildcard_errors_are_collected() {
        let parsed = parse_command("ls [*", ENTRIES, &Limits::default()).unwrap();
        assert_eq!(parsed.diagnostics.len(), 1);
        match parsed.command {
            Command::External(plan) => assert_eq!(plan.first.args, args(&["ls"])),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn builtins_are_tagged() {
        assert_eq!(
            parse("cd ..").unwrap(),
            Command::Builtin(BuiltinInvocation {
                builtin: BuiltinCommands::Cd(Cd),
                args: args(&[".."]),
            })
        );
        assert_eq!(
            parse("pwd").unwrap(),
            Command::Builtin(BuiltinInvocation {
                builtin: BuiltinCommands::Pwd(Pwd),
                args: vec![],
            })
        );
        assert_eq!(
            parse("which ls > out.txt").unwrap(),
            Command::Builtin(BuiltinInvocation {
                builtin: BuiltinCommands::Which(Which),
                args: args(&["ls"]),
            })
        );
        assert!(matches!(
            parse("exit now | cat").unwrap(),
            Command::Builtin(BuiltinInvocation {
                builtin: BuiltinCommands::Exit(Exit),
                ..
            })
        ));
    }

    #[test]
    fn builtin_names_only_match_exactly() {
        assert!(matches!(parse("cdx").unwrap(), Command::External(_)));
        assert!(matches!(parse("./pwd").unwrap(), Command::External(_)));
    }

    #[test]
    fn limits_are_enforced() {
        let limits = Limits {
            max_line_length: 10,
            max_args: 3,
        };

        assert!(parse_command("echo 12345\n", ENTRIES, &limits).is_ok());
        assert_eq!(
            parse_command("echo 123456", ENTRIES, &limits).unwrap_err(),
            CommandParseError::LineTooLong { len: 11, limit: 10 }
        );
        assert_eq!(
            parse_command("ls * *", ENTRIES, &limits).unwrap_err(),
            CommandParseError::TooManyArguments { count: 4, limit: 3 }
        );
    }
}
