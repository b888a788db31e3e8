mod common;

use common::{builtin_invoker, draft, new_context, populate};
use hbc_core::console::ScriptedConsole;
use hbc_core::contract::{Command, ExecutionContext, Outcome};
use hbc_core::hbc_core_types::DispatchContext;
use hbc_core::model::Mood;
use hbc_core::{CommandArgument, CommandData, Invoker, Request, Response, Result};
use tempfile::TempDir;

fn network() -> DispatchContext {
    DispatchContext::network("127.0.0.1:40000".parse().unwrap())
}

// ===== SERVER TABLE =====

#[test]
fn test_unknown_server_command_reports_exact_message() {
    let dir = TempDir::new().unwrap();
    let invoker = builtin_invoker(&dir);
    let mut console = ScriptedConsole::new();

    invoker.execute_server_command("frobnicate", CommandArgument::none(), &mut console);

    assert_eq!(
        console.errors,
        vec!["Command frobnicate not found. Type \"help\" to see available commands."]
    );
    assert!(console.output.is_empty());
    assert!(!invoker.context().shutdown.is_triggered());
    assert!(invoker.context().collection.lock().is_empty());
}

#[test]
fn test_server_command_lookup_is_case_sensitive() {
    let dir = TempDir::new().unwrap();
    let invoker = builtin_invoker(&dir);
    let mut console = ScriptedConsole::new();

    invoker.execute_server_command("HELP", CommandArgument::none(), &mut console);

    assert_eq!(console.errors.len(), 1);
}

#[test]
fn test_server_command_wrong_arg_count_reports_and_continues() {
    let dir = TempDir::new().unwrap();
    let invoker = builtin_invoker(&dir);
    let mut console = ScriptedConsole::new();

    invoker.execute_server_command("save", CommandArgument::single("extra"), &mut console);
    invoker.execute_server_command("help", CommandArgument::none(), &mut console);

    assert_eq!(console.errors.len(), 1);
    assert!(console.errors[0].contains("expects 0 argument(s), got 1"));
    assert_eq!(console.output.len(), 1);
    assert!(!dir.path().join("humans.json").exists());
}

#[test]
fn test_help_lists_every_server_command() {
    let dir = TempDir::new().unwrap();
    let invoker = builtin_invoker(&dir);
    let mut console = ScriptedConsole::new();

    invoker.execute_server_command("help", CommandArgument::none(), &mut console);

    let listing = &console.output[0];
    let names: Vec<&str> = listing
        .lines()
        .map(|line| line.split_whitespace().next().unwrap())
        .collect();
    assert_eq!(names, vec!["exit", "help", "save"]);
}

#[test]
fn test_save_writes_data_file() {
    let dir = TempDir::new().unwrap();
    let invoker = builtin_invoker(&dir);
    populate(invoker.context(), vec![draft("Ann", Mood::Calm)]);
    let mut console = ScriptedConsole::new();

    invoker.execute_server_command("save", CommandArgument::none(), &mut console);

    assert!(console.errors.is_empty(), "{:?}", console.errors);
    let loaded = invoker.context().store.load().unwrap().unwrap();
    assert_eq!(loaded.len(), 1);
}

#[test]
fn test_exit_confirmed_saves_and_triggers_shutdown() {
    let dir = TempDir::new().unwrap();
    let invoker = builtin_invoker(&dir);
    let mut console = ScriptedConsole::with_answers([true]);

    invoker.execute_server_command("exit", CommandArgument::none(), &mut console);

    assert_eq!(console.prompts, vec!["Save collection before exit?"]);
    assert!(invoker.context().shutdown.is_triggered());
    assert!(dir.path().join("humans.json").exists());
}

#[test]
fn test_exit_declined_skips_save() {
    let dir = TempDir::new().unwrap();
    let invoker = builtin_invoker(&dir);
    let mut console = ScriptedConsole::with_answers([false]);

    invoker.execute_server_command("exit", CommandArgument::none(), &mut console);

    assert!(invoker.context().shutdown.is_triggered());
    assert!(!dir.path().join("humans.json").exists());
}

#[test]
fn test_exit_without_answer_counts_as_no() {
    let dir = TempDir::new().unwrap();
    let invoker = builtin_invoker(&dir);
    let mut console = ScriptedConsole::new();

    invoker.execute_server_command("exit", CommandArgument::none(), &mut console);

    assert!(invoker.context().shutdown.is_triggered());
    assert!(!dir.path().join("humans.json").exists());
}

// ===== CLIENT TABLE =====

#[test]
fn test_client_command_returns_response() {
    let dir = TempDir::new().unwrap();
    let invoker = builtin_invoker(&dir);

    let response =
        invoker.execute_client_command(Request::new("info", CommandArgument::none()), &network());

    assert!(!response.is_error());
    assert!(response.payload.contains("Elements: 0"));
}

#[test]
fn test_unadvertised_client_command_yields_error_response() {
    let dir = TempDir::new().unwrap();
    let invoker = builtin_invoker(&dir);

    // Server commands are never reachable over the network
    let response =
        invoker.execute_client_command(Request::new("exit", CommandArgument::none()), &network());

    assert!(response.is_error());
    assert!(response.payload.starts_with("Command exit not found."));
    assert!(!invoker.context().shutdown.is_triggered());
}

#[test]
fn test_client_command_invalid_argument_leaves_collection_untouched() {
    let dir = TempDir::new().unwrap();
    let invoker = builtin_invoker(&dir);
    populate(invoker.context(), vec![draft("Ann", Mood::Calm)]);

    let response = invoker.execute_client_command(
        Request::new("remove_lower_key", CommandArgument::single("abc")),
        &network(),
    );

    assert!(response.is_error());
    assert_eq!(response.payload, "Expected integer value");
    assert_eq!(invoker.context().collection.lock().len(), 1);
}

#[test]
fn test_every_advertised_command_answers() {
    // Any request naming an advertised command produces a response, even
    // with an arbitrary argument shape
    let dir = TempDir::new().unwrap();
    let invoker = builtin_invoker(&dir);

    for data in invoker.advertised_commands() {
        for argument in [CommandArgument::none(), CommandArgument::single("1")] {
            let response =
                invoker.execute_client_command(Request::new(&data.name, argument), &network());
            assert!(!response.payload.is_empty(), "{} gave empty payload", data.name);
        }
    }
}

#[test]
fn test_advertised_commands_match_client_table() {
    let dir = TempDir::new().unwrap();
    let invoker = builtin_invoker(&dir);

    let names: Vec<String> = invoker
        .advertised_commands()
        .into_iter()
        .map(|d| d.name)
        .collect();

    assert_eq!(
        names,
        vec![
            "clear",
            "count_greater_than_mood",
            "count_less_than_minutes_of_waiting",
            "execute_script",
            "filter_by_car",
            "info",
            "insert",
            "remove_greater",
            "remove_key",
            "remove_lower_key",
            "show",
            "update",
        ]
    );
    assert!(names.iter().all(|n| invoker.is_client_command(n)));
}

// ===== CONFIRMATION ON THE NETWORK PATH =====

struct AskFirst {
    data: CommandData,
}

impl Command for AskFirst {
    fn data(&self) -> &CommandData {
        &self.data
    }

    fn execute(&self, _argument: &CommandArgument, _ctx: &ExecutionContext) -> Result<Outcome> {
        Ok(Outcome::Confirm {
            prompt: "Really?".to_string(),
            fallback: Response::text("not confirmed"),
        })
    }

    fn resume(
        &self,
        _argument: &CommandArgument,
        confirmed: bool,
        _ctx: &ExecutionContext,
    ) -> Result<Response> {
        Ok(Response::text(format!("confirmed={confirmed}")))
    }
}

#[test]
fn test_confirmation_uses_fallback_over_network() {
    let dir = TempDir::new().unwrap();
    let mut builder = Invoker::builder();
    builder.register_client_command(AskFirst {
        data: CommandData::new("ask", "asks", 0, ""),
    });
    let invoker = builder.build(new_context(&dir));

    let response =
        invoker.execute_client_command(Request::new("ask", CommandArgument::none()), &network());

    assert_eq!(response, Response::text("not confirmed"));
}

#[test]
fn test_confirmation_prompts_on_console() {
    let dir = TempDir::new().unwrap();
    let mut builder = Invoker::builder();
    builder.register_server_command(AskFirst {
        data: CommandData::new("ask", "asks", 0, ""),
    });
    let invoker = builder.build(new_context(&dir));
    let mut console = ScriptedConsole::with_answers([true]);

    invoker.execute_server_command("ask", CommandArgument::none(), &mut console);

    assert_eq!(console.prompts, vec!["Really?"]);
    assert_eq!(console.output, vec!["confirmed=true"]);
}

#[test]
fn test_last_registration_wins() {
    let dir = TempDir::new().unwrap();
    let mut builder = Invoker::builder();
    builder
        .register_client_command(AskFirst {
            data: CommandData::new("dup", "first", 0, ""),
        })
        .register_client_command(AskFirst {
            data: CommandData::new("dup", "second", 0, ""),
        });
    let invoker = builder.build(new_context(&dir));

    let advertised = invoker.advertised_commands();
    assert_eq!(advertised.len(), 1);
    assert_eq!(advertised[0].description, "second");
}
