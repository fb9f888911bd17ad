//! Forwarding policy — which tokens go to the runtime and which to the program.

use crate::args::classifier::ScanState;
use crate::args::dispatch::DispatchOutcome;
use crate::args::experiments::{is_experiment_flag, Experiments};
use crate::args::sink::ProcessSink;

/// Final argument lists for one launch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Forwarded {
    /// Arguments for the runtime itself.
    pub runtime_args: Vec<String>,
    /// Arguments for the launched program: the script's own arguments for a
    /// direct run, the dev-tool command line otherwise.
    pub program_args: Vec<String>,
    pub warnings: Vec<String>,
}

/// Builder for the program argument list.
#[derive(Debug, Clone, Default)]
pub struct ArgAssembler {
    args: Vec<String>,
}

impl ArgAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single fixed argument.
    pub fn with_arg(mut self, arg: &str) -> Self {
        self.args.push(arg.to_string());
        self
    }

    /// Append arguments verbatim.
    pub fn with_args(mut self, args: &[String]) -> Self {
        self.args.extend_from_slice(args);
        self
    }

    /// Append the composite experiment flag, if any experiments were enabled.
    pub fn with_experiments(mut self, experiments: &Experiments) -> Self {
        self.args.extend(experiments.synthesize());
        self
    }

    pub fn build(self) -> Vec<String> {
        self.args
    }
}

/// Populate both argument lists for `outcome`.
///
/// A direct run also pushes socket and TLS settings to `sink`.
pub fn forward(
    argv: &[String],
    scan: &ScanState,
    outcome: &DispatchOutcome,
    sink: &mut dyn ProcessSink,
) -> Forwarded {
    let options = &scan.options;
    let mut forwarded = Forwarded::default();

    match outcome {
        DispatchOutcome::DirectRun { script_args, .. } => {
            forwarded.runtime_args = scan.staging.clone();
            if options.deterministic
                && !forwarded.runtime_args.iter().any(|a| a == "--deterministic")
            {
                forwarded.runtime_args.push("--deterministic".into());
            }
            push_process_settings(scan, sink);
            forwarded.program_args = script_args.clone();
        }
        DispatchOutcome::ImplicitDevTool {
            flag_tokens,
            trailing_args,
            ..
        } => {
            forwarded.program_args = ArgAssembler::new()
                .with_arg("run")
                .with_args(flag_tokens)
                .with_experiments(&options.experiments)
                .with_args(trailing_args)
                .build();
        }
        DispatchOutcome::ExplicitDevTool {
            command,
            command_args,
            ..
        } => {
            forwarded.warnings =
                ignored_flag_warnings(&argv[1..scan.index], &options.experiments, command);
            for warning in &forwarded.warnings {
                tracing::debug!("{}", warning);
            }
            forwarded.program_args = ArgAssembler::new()
                .with_experiments(&options.experiments)
                .with_arg(command)
                .with_args(command_args)
                .build();
        }
        DispatchOutcome::DevToolHelp { .. } => {
            forwarded.program_args = ArgAssembler::new().with_arg("help").build();
        }
        DispatchOutcome::DevToolAnalytics { toggle, .. } => {
            forwarded.program_args = toggle
                .commands()
                .into_iter()
                .fold(ArgAssembler::new(), ArgAssembler::with_arg)
                .build();
        }
        DispatchOutcome::UsageError => {}
    }

    forwarded
}

fn push_process_settings(scan: &ScanState, sink: &mut dyn ProcessSink) {
    let options = &scan.options;
    sink.set_deterministic(options.deterministic);
    sink.set_short_socket_read(options.short_socket_read);
    sink.set_short_socket_write(options.short_socket_write);
    sink.set_root_certs_file(options.root_certs_file.as_deref());
    sink.set_root_certs_cache(options.root_certs_cache.as_deref());
    sink.set_use_incremental_compiler(options.use_incremental_compiler);
}

/// One warning per scanned flag the dev-tool command will not see.
///
/// Experiment flags travel in the composite flag. One extra token (the
/// `--enable-dart-dev` switch) is tolerated; beyond that every non-experiment
/// token is reported, the switch included.
fn ignored_flag_warnings(
    flag_tokens: &[String],
    experiments: &Experiments,
    command: &str,
) -> Vec<String> {
    if flag_tokens.is_empty() {
        return Vec::new();
    }
    let experiment_flags = if experiments.is_empty() {
        0
    } else {
        flag_tokens.iter().filter(|t| is_experiment_flag(t)).count()
    };
    if flag_tokens.len() == experiment_flags + 1 {
        return Vec::new();
    }

    flag_tokens
        .iter()
        .filter(|t| !is_experiment_flag(t))
        .map(|t| {
            format!(
                "Warning: the flag '{t}' was passed as a VM option and is being ignored; \
                 pass it after the command instead (e.g., '{command} {t} ...')."
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assembler_keeps_order() {
        let mut experiments = Experiments::new();
        experiments.add("x");
        let args = ArgAssembler::new()
            .with_arg("run")
            .with_args(&["--a".to_string()])
            .with_experiments(&experiments)
            .with_args(&["main.dart".to_string()])
            .build();
        assert_eq!(args, vec!["run", "--a", "--enable-experiment=x", "main.dart"]);
    }

    #[test]
    fn assembler_skips_empty_experiments() {
        let args = ArgAssembler::new()
            .with_experiments(&Experiments::new())
            .with_arg("help")
            .build();
        assert_eq!(args, vec!["help"]);
    }

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn experiments(names: &str) -> Experiments {
        let mut experiments = Experiments::new();
        experiments.add(names);
        experiments
    }

    #[test]
    fn warnings_list_every_non_experiment_token() {
        let flags = tokens(&[
            "--enable-dart-dev",
            "--enable-experiment=a",
            "--trace-loading",
        ]);
        let warnings = ignored_flag_warnings(&flags, &experiments("a"), "test");
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("'--enable-dart-dev'"));
        assert!(warnings[1].contains("'--trace-loading'"));
        assert!(warnings[1].contains("after the command"));
    }

    #[test]
    fn one_extra_token_is_tolerated() {
        let none = Experiments::new();
        assert!(ignored_flag_warnings(&tokens(&["--trace-loading"]), &none, "run").is_empty());
        assert!(ignored_flag_warnings(&[], &none, "run").is_empty());

        let flags = tokens(&["--enable-experiment=a", "--enable_experiment=b", "--enable-dart-dev"]);
        assert!(ignored_flag_warnings(&flags, &experiments("a,b"), "run").is_empty());
    }

    #[test]
    fn only_experiment_tokens_are_not_reported() {
        let flags = tokens(&["--enable-experiment=a", "--enable-experiment=b"]);
        let warnings = ignored_flag_warnings(&flags, &experiments("a,b"), "run");
        assert!(warnings.is_empty());
    }

    #[test]
    fn empty_experiment_values_do_not_count() {
        let flags = tokens(&["--enable-experiment=", "--trace-loading"]);
        let warnings = ignored_flag_warnings(&flags, &Experiments::new(), "run");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("'--trace-loading'"));
    }
}
