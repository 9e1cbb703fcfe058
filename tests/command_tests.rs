//! Console Command Tests
//!
//! Tests for the `pwminit`, `pwm` and `help` commands and the shell
//! dispatcher, using the recording mock peripheral.
//! Run with: cargo test --target x86_64-unknown-linux-gnu --no-default-features --features std --test command_tests

use pwm_console::breathe::Breathe;
use pwm_console::commands::{find, Command, Execution, Shell, COMMANDS};
use pwm_console::controller::PwmController;
use pwm_console::hal::mock::{HwOp, MockPeripheral};
use pwm_console::types::{Channel, InvocationMode};

type TestShell = Shell<MockPeripheral, String>;

fn shell() -> TestShell {
    Shell::new(PwmController::new(MockPeripheral::new()), String::new())
}

/// Shell after `pwminit`, with the recorded calls cleared
fn initialized_shell() -> TestShell {
    let mut shell = shell();
    assert_eq!(shell.execute("pwminit"), Execution::Done);
    shell.controller_mut().peripheral_mut().clear_ops();
    shell
}

fn hw(shell: &TestShell) -> &MockPeripheral {
    shell.controller().peripheral()
}

fn stops() -> [HwOp; 3] {
    [
        HwOp::Stop(Channel::Ch1),
        HwOp::Stop(Channel::Ch2),
        HwOp::Stop(Channel::Ch3),
    ]
}

// =============================================================================
// Registry Tests
// =============================================================================

#[test]
fn test_registry_names() {
    let names: Vec<&str> = COMMANDS.iter().map(|spec| spec.name).collect();
    assert_eq!(names, vec!["help", "pwminit", "pwm", "pwmbreathe"]);
}

#[test]
fn test_find() {
    assert_eq!(find("pwm").map(|spec| spec.command), Some(Command::Pwm));
    assert_eq!(
        find("pwmbreathe").map(|spec| spec.command),
        Some(Command::PwmBreathe)
    );
    assert!(find("PWM").is_none());
    assert!(find("pw").is_none());
}

// =============================================================================
// pwminit Tests
// =============================================================================

#[test]
fn test_pwminit_configures_all_channels() {
    let mut shell = shell();
    shell.execute("pwminit");

    let hw = hw(&shell);
    assert!(hw.timer_running());
    for channel in Channel::ALL {
        assert!(hw.channel_config(channel).is_some());
        assert!(!hw.is_enabled(channel));
    }
    assert!(shell.controller().context().is_some());
    assert!(shell.output().is_empty());
}

#[test]
fn test_pwminit_ignores_arguments() {
    let mut shell = shell();
    shell.execute("pwminit 1 2 3");
    assert!(hw(&shell).timer_running());
}

#[test]
fn test_pwminit_non_interactive_no_effect() {
    let mut shell = shell();
    assert_eq!(
        shell.execute_with_mode("pwminit", InvocationMode::ShortHelp),
        Execution::Done
    );
    assert!(hw(&shell).ops().is_empty());
    assert!(shell.controller().context().is_none());
}

// =============================================================================
// pwm Tests
// =============================================================================

#[test]
fn test_pwm_half_duty() {
    let mut shell = initialized_shell();
    assert_eq!(shell.execute("pwm 1 50"), Execution::Done);

    let mut expected = stops().to_vec();
    expected.push(HwOp::SetCompare(Channel::Ch1, 512));
    expected.push(HwOp::Start(Channel::Ch1));
    assert_eq!(hw(&shell).ops(), expected.as_slice());
    assert!(shell.output().is_empty());
}

#[test]
fn test_pwm_full_duty() {
    let mut shell = initialized_shell();
    shell.execute("pwm 3 100");
    assert_eq!(hw(&shell).compare(Channel::Ch3), 1024);
    assert!(hw(&shell).is_enabled(Channel::Ch3));
}

#[test]
fn test_pwm_zero_duty_still_started() {
    let mut shell = initialized_shell();
    shell.execute("pwm 2 0");
    assert_eq!(hw(&shell).compare(Channel::Ch2), 0);
    assert!(hw(&shell).is_enabled(Channel::Ch2));
}

#[test]
fn test_pwm_duty_not_clamped() {
    let mut shell = initialized_shell();
    shell.execute("pwm 1 150");
    assert_eq!(hw(&shell).compare(Channel::Ch1), 1536);
}

#[test]
fn test_pwm_compare_past_16_bits_truncated() {
    let mut shell = initialized_shell();
    assert_eq!(shell.execute("pwm 1 6400"), Execution::Done);

    let hw = hw(&shell);
    assert_eq!(hw.compare_writes(Channel::Ch1), vec![65_536]);
    assert_eq!(hw.compare(Channel::Ch1), 0);
    assert!(hw.is_enabled(Channel::Ch1));
    assert!(shell.output().is_empty());
}

#[test]
fn test_pwm_hex_arguments() {
    let mut shell = initialized_shell();
    shell.execute("pwm 0x2 0x32");
    assert_eq!(hw(&shell).compare(Channel::Ch2), 512);
}

#[test]
fn test_pwm_stops_other_channels() {
    let mut shell = initialized_shell();
    shell.execute("pwm 1 50");
    shell.execute("pwm 2 25");

    let hw = hw(&shell);
    assert!(!hw.is_enabled(Channel::Ch1));
    assert!(hw.is_enabled(Channel::Ch2));
    assert!(!hw.is_enabled(Channel::Ch3));
    assert_eq!(hw.compare(Channel::Ch2), 256);
}

#[test]
fn test_pwm_invalid_channel() {
    let mut shell = initialized_shell();
    shell.execute("pwm 1 50");
    shell.controller_mut().peripheral_mut().clear_ops();

    assert_eq!(shell.execute("pwm 4 50"), Execution::Done);

    assert_eq!(shell.output(), "No channel found\n");
    assert_eq!(hw(&shell).ops(), &stops());
    assert!(Channel::ALL.iter().all(|&ch| !hw(&shell).is_enabled(ch)));
}

#[test]
fn test_pwm_channel_zero_invalid() {
    let mut shell = initialized_shell();
    shell.execute("pwm 0 50");
    assert_eq!(shell.output(), "No channel found\n");
}

#[test]
fn test_pwm_missing_channel() {
    let mut shell = initialized_shell();
    shell.execute("pwm");
    assert_eq!(shell.output(), "Missing Channel\n");
    assert_eq!(hw(&shell).write_count(), 0);
}

#[test]
fn test_pwm_malformed_channel() {
    let mut shell = initialized_shell();
    shell.execute("pwm one 50");
    assert_eq!(shell.output(), "Missing Channel\n");
    assert_eq!(hw(&shell).write_count(), 0);
}

#[test]
fn test_pwm_missing_duty() {
    let mut shell = initialized_shell();
    shell.execute("pwm 1");
    assert_eq!(shell.output(), "Missing value for duty cycle\n");
    assert_eq!(hw(&shell).write_count(), 0);
}

#[test]
fn test_pwm_non_interactive_no_effect() {
    for mode in [InvocationMode::ShortHelp, InvocationMode::LongHelp] {
        let mut shell = initialized_shell();
        shell.execute_with_mode("pwm 1 50", mode);
        assert!(hw(&shell).ops().is_empty());
        assert!(shell.output().is_empty());
    }
}

#[test]
fn test_pwm_non_interactive_bad_args_silent() {
    let mut shell = initialized_shell();
    shell.execute_with_mode("pwm", InvocationMode::ShortHelp);
    assert!(shell.output().is_empty());
}

// =============================================================================
// help Tests
// =============================================================================

#[test]
fn test_help_lists_all_commands() {
    let mut shell = shell();
    shell.execute("help");

    let lines: Vec<&str> = shell.output().lines().collect();
    assert_eq!(lines.len(), COMMANDS.len());
    assert_eq!(
        lines[0],
        format!("{:<11}{:<19}{}", "help", "[command]", "List commands")
    );
    for (line, spec) in lines.iter().zip(COMMANDS.iter()) {
        assert!(line.starts_with(spec.name));
        assert!(line.ends_with(spec.help));
    }
}

#[test]
fn test_help_single_command() {
    let mut shell = shell();
    shell.execute("help pwm");
    assert_eq!(
        *shell.output(),
        format!(
            "{:<11}{:<19}{}\n",
            "pwm", "<channel> <value>", "Sets PWM duty cycle (percent) on a channel"
        )
    );
}

#[test]
fn test_help_unknown_command() {
    let mut shell = shell();
    shell.execute("help nope");
    assert_eq!(shell.output(), "Unknown command: nope\n");
}

#[test]
fn test_help_touches_no_hardware() {
    let mut shell = shell();
    shell.execute("help");
    shell.execute("help pwmbreathe");
    assert!(hw(&shell).ops().is_empty());
}

// =============================================================================
// Dispatcher Tests
// =============================================================================

#[test]
fn test_empty_line_idle() {
    let mut shell = shell();
    assert_eq!(shell.execute(""), Execution::Idle);
    assert_eq!(shell.execute("   \t "), Execution::Idle);
    assert!(shell.output().is_empty());
}

#[test]
fn test_unknown_command() {
    let mut shell = shell();
    assert_eq!(shell.execute("frobnicate 1 2"), Execution::Unknown);
    assert_eq!(shell.output(), "Unknown command: frobnicate\n");
    assert!(hw(&shell).ops().is_empty());
}

#[test]
fn test_leading_whitespace_trimmed() {
    let mut shell = initialized_shell();
    shell.execute("   pwm 1 100  ");
    assert_eq!(hw(&shell).compare(Channel::Ch1), 1024);
}

#[test]
fn test_feed_bytes_runs_command() {
    let mut shell = initialized_shell();
    let mut results = Vec::new();
    for &byte in b"pwm 2 50\r\n" {
        if let Some(execution) = shell.feed(byte) {
            results.push(execution);
        }
    }
    assert_eq!(results, vec![Execution::Done, Execution::Idle]);
    assert_eq!(hw(&shell).compare(Channel::Ch2), 512);
}

#[test]
fn test_feed_with_backspace() {
    let mut shell = initialized_shell();
    for &byte in b"pwm 1 59\x080\r" {
        shell.feed(byte);
    }
    assert_eq!(hw(&shell).compare(Channel::Ch1), 512);
}

#[test]
fn test_breathe_dispatch_returns_ramp() {
    let mut shell = initialized_shell();
    assert_eq!(
        shell.execute("pwmbreathe 1 5"),
        Execution::Breathe(Breathe::new(Channel::Ch1, 5))
    );
    assert_eq!(hw(&shell).ops(), &stops());
}
