//! Console Commands
//!
//! The `pwminit`, `pwm` and `pwmbreathe` handlers, the table that maps
//! command names to them, and the [`Shell`] that reads lines and
//! dispatches.
//!
//! Handlers never report failure to the dispatcher: problems are written
//! to the console and the handler returns.

use core::fmt::Write;

use crate::breathe::Breathe;
use crate::console::{Args, LineBuffer};
use crate::controller::PwmController;
use crate::error::CommandError;
use crate::hal::{DutyCycle, PwmPeripheral};
use crate::types::{Channel, InvocationMode};

/// Registered commands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// `help [command]`
    Help,
    /// `pwminit`
    PwmInit,
    /// `pwm <channel> <value>`
    Pwm,
    /// `pwmbreathe <channel> <value>`
    PwmBreathe,
}

/// Registry entry
#[derive(Clone, Copy, Debug)]
pub struct CommandSpec {
    /// Handler selector
    pub command: Command,
    /// Name typed on the console
    pub name: &'static str,
    /// Argument synopsis
    pub usage: &'static str,
    /// One-line description
    pub help: &'static str,
}

/// Command registry
pub const COMMANDS: [CommandSpec; 4] = [
    CommandSpec {
        command: Command::Help,
        name: "help",
        usage: "[command]",
        help: "List commands",
    },
    CommandSpec {
        command: Command::PwmInit,
        name: "pwminit",
        usage: "",
        help: "Initializes PWM channels",
    },
    CommandSpec {
        command: Command::Pwm,
        name: "pwm",
        usage: "<channel> <value>",
        help: "Sets PWM duty cycle (percent) on a channel",
    },
    CommandSpec {
        command: Command::PwmBreathe,
        name: "pwmbreathe",
        usage: "<channel> <value>",
        help: "LED breathe until the user button is pressed",
    },
];

/// Look a command up by name
#[must_use]
pub fn find(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.name == name)
}

/// Outcome of one command line
#[derive(Debug, PartialEq, Eq)]
pub enum Execution {
    /// Empty line
    Idle,
    /// Handler ran to completion
    Done,
    /// Name not in the registry
    Unknown,
    /// Breathe ramp started; the caller drives it to cancellation
    Breathe(Breathe),
}

/// `pwminit`: configure timer, pins and channels
pub fn pwm_init<P: PwmPeripheral>(pwm: &mut PwmController<P>, mode: InvocationMode) {
    if !mode.is_interactive() {
        return;
    }
    pwm.init();
}

/// `pwm <channel> <duty>`: drive one channel at `duty` percent, stop the others
pub fn pwm_set<P: PwmPeripheral, W: Write>(
    pwm: &mut PwmController<P>,
    args: &mut Args<'_>,
    out: &mut W,
    mode: InvocationMode,
) {
    if !mode.is_interactive() {
        return;
    }
    if let Err(err) = try_pwm_set(pwm, args) {
        log_debug!("pwm: {}", err);
        report(out, err);
    }
}

fn try_pwm_set<P: PwmPeripheral>(
    pwm: &mut PwmController<P>,
    args: &mut Args<'_>,
) -> Result<(), CommandError> {
    let channel = args
        .fetch_u32()
        .map_err(|_| CommandError::MissingChannel)?;
    let duty = args.fetch_u32().map_err(|_| CommandError::MissingDuty)?;

    pwm.stop_all();

    let channel = Channel::try_from(channel)?;
    let duty = DutyCycle::from_percent(duty);
    pwm.set_duty(channel, duty);
    pwm.start(channel);

    log_info!("{} at {} (compare {})", channel, duty, duty.compare_value());
    Ok(())
}

/// Prepare `pwmbreathe <channel> <ceiling>`
///
/// Stops every channel and parses the arguments. The mode flag is not
/// consulted, and absent arguments are not reported: a missing channel
/// ends as "No channel found", a missing ceiling ramps to 0.
pub fn pwm_breathe_begin<P: PwmPeripheral, W: Write>(
    pwm: &mut PwmController<P>,
    args: &mut Args<'_>,
    out: &mut W,
    mode: InvocationMode,
) -> Option<Breathe> {
    log_trace!("pwmbreathe invoked in {} mode", mode);
    let _ = mode;

    pwm.stop_all();

    let channel = args.fetch_u32().unwrap_or(0);
    let ceiling = args.fetch_u32().unwrap_or(0);

    match Channel::try_from(channel) {
        Ok(channel) => {
            log_info!("breathe on {} up to {}", channel, ceiling);
            Some(Breathe::new(channel, ceiling))
        }
        Err(err) => {
            report(out, err);
            None
        }
    }
}

/// `pwmbreathe <channel> <ceiling>`: ramp until the user button is pressed
///
/// Blocks the caller for the whole ramp.
pub fn pwm_breathe<P: PwmPeripheral, W: Write>(
    pwm: &mut PwmController<P>,
    args: &mut Args<'_>,
    out: &mut W,
    mode: InvocationMode,
) {
    if let Some(breathe) = pwm_breathe_begin(pwm, args, out, mode) {
        breathe.run(pwm);
    }
}

/// `help [command]`
pub fn help<W: Write>(args: &mut Args<'_>, out: &mut W, mode: InvocationMode) {
    if !mode.is_interactive() {
        return;
    }
    match args.next_token() {
        Some(name) => match find(name) {
            Some(spec) => write_help(out, spec),
            None => {
                let _ = writeln!(out, "Unknown command: {name}");
            }
        },
        None => COMMANDS.iter().for_each(|spec| write_help(out, spec)),
    }
}

fn write_help<W: Write>(out: &mut W, spec: &CommandSpec) {
    let _ = writeln!(out, "{:<11}{:<19}{}", spec.name, spec.usage, spec.help);
}

fn report<W: Write>(out: &mut W, err: CommandError) {
    let _ = writeln!(out, "{err}");
}

/// Console shell: line assembly plus dispatch
pub struct Shell<P, W> {
    pwm: PwmController<P>,
    out: W,
    line: LineBuffer,
}

impl<P: PwmPeripheral, W: Write> Shell<P, W> {
    /// Create a shell around a controller and an output sink
    #[must_use]
    pub const fn new(pwm: PwmController<P>, out: W) -> Self {
        Self {
            pwm,
            out,
            line: LineBuffer::new(),
        }
    }

    /// Feed one console byte; runs the command when a line completes
    pub fn feed(&mut self, byte: u8) -> Option<Execution> {
        let line = self.line.feed(byte)?;
        Some(self.execute(&line))
    }

    /// Run a line in interactive mode
    pub fn execute(&mut self, line: &str) -> Execution {
        self.execute_with_mode(line, InvocationMode::Interactive)
    }

    /// Run a line with an explicit invocation mode
    pub fn execute_with_mode(&mut self, line: &str, mode: InvocationMode) -> Execution {
        let line = line.trim();
        let (name, rest) = line
            .split_once(|c: char| c.is_ascii_whitespace())
            .unwrap_or((line, ""));
        if name.is_empty() {
            return Execution::Idle;
        }

        let Some(spec) = find(name) else {
            let _ = writeln!(self.out, "Unknown command: {name}");
            return Execution::Unknown;
        };

        let mut args = Args::new(rest);
        match spec.command {
            Command::Help => help(&mut args, &mut self.out, mode),
            Command::PwmInit => pwm_init(&mut self.pwm, mode),
            Command::Pwm => pwm_set(&mut self.pwm, &mut args, &mut self.out, mode),
            Command::PwmBreathe => {
                return pwm_breathe_begin(&mut self.pwm, &mut args, &mut self.out, mode)
                    .map_or(Execution::Done, Execution::Breathe);
            }
        }
        Execution::Done
    }

    /// Run a line, driving a breathe ramp to cancellation with blocking delays
    pub fn execute_blocking(&mut self, line: &str) -> Execution {
        match self.execute(line) {
            Execution::Breathe(breathe) => {
                breathe.run(&mut self.pwm);
                Execution::Done
            }
            other => other,
        }
    }

    /// Borrow the controller
    #[must_use]
    pub const fn controller(&self) -> &PwmController<P> {
        &self.pwm
    }

    /// Mutably borrow the controller (for driving a breathe ramp)
    pub fn controller_mut(&mut self) -> &mut PwmController<P> {
        &mut self.pwm
    }

    /// Borrow the output sink
    #[must_use]
    pub const fn output(&self) -> &W {
        &self.out
    }

    /// Mutably borrow the output sink
    pub fn output_mut(&mut self) -> &mut W {
        &mut self.out
    }
}
