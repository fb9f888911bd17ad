//! Flag registry — every flag the launcher recognizes, in match order.
//!
//! Adding a flag means adding a row here; the matcher iterates the table in
//! order and the first matching row wins.

/// Who consumes a flag once it is recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagRole {
    /// Configures the runtime; the token goes to the staging list.
    Runtime,
    /// Observed by the launcher and also forwarded to the runtime.
    DualPurpose,
    /// Dev-tool flag — consumed here, never forwarded to the runtime.
    DevToolOnly,
}

/// Boolean settings a flag can switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolSetting {
    Version,
    Help,
    Verbose,
    DependenciesOnly,
    PrintDependencies,
    TraceLoading,
    Deterministic,
    ShortSocketRead,
    ShortSocketWrite,
    DisableExit,
    EnableServicePortFallback,
    DisableServiceAuthCodes,
    SuppressCoreDump,
    PrintFlags,
    VerboseDebug,
    EnableAnalytics,
    DisableAnalytics,
    /// Engine-only flag; nothing to record locally.
    Engine,
}

/// String settings a flag can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringSetting {
    Packages,
    Namespace,
    Snapshot,
    Depfile,
    DepfileOutputFilename,
    SnapshotDepfile,
    RootCertsFile,
    RootCertsCache,
    WriteServiceInfo,
    SaveCompilationTrace,
    LoadCompilationTrace,
    SaveTypeFeedback,
    LoadTypeFeedback,
    Dfe,
}

/// Enumerated settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumSetting {
    SnapshotKind,
}

/// Flags with custom effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Callback {
    VmService,
    Observe,
    AbiVersion,
    EnableExperiment,
    EnableDevTool,
    DisableDevTool,
    Define,
    HotReloadTestMode,
    HotReloadRollbackTestMode,
}

impl Callback {
    /// Whether the text after the flag name belongs to this callback.
    ///
    /// Service flags take any suffix and reject bad syntax themselves, so a
    /// typo surfaces as an error instead of an unknown flag.
    pub fn accepts_suffix(self, suffix: &str) -> bool {
        match self {
            Callback::VmService | Callback::Observe => true,
            Callback::AbiVersion | Callback::EnableExperiment | Callback::Define => {
                suffix.starts_with('=')
            }
            Callback::EnableDevTool
            | Callback::DisableDevTool
            | Callback::HotReloadTestMode
            | Callback::HotReloadRollbackTestMode => suffix.is_empty(),
        }
    }
}

/// Value kind of a flag and the setting it targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    /// `--name`, or `--no-name` to reset.
    Bool(BoolSetting),
    /// `--name=<value>` or `--name:<value>`.
    String(StringSetting),
    /// `--name=<choice>` or `--name:<choice>`.
    Enum(EnumSetting),
    /// `--name<suffix>`; the callback interprets the suffix.
    Callback(Callback),
}

/// A single flag definition.
#[derive(Debug, Clone)]
pub struct FlagDef {
    /// Primary long form (e.g., "--snapshot-kind").
    pub long: &'static str,
    /// Other spellings of the same flag (usually the underscore form).
    pub synonyms: &'static [&'static str],
    /// Optional short form (e.g., "-h").
    pub short: Option<&'static str>,
    pub kind: FlagKind,
    pub role: FlagRole,
    /// Human-readable description.
    pub description: &'static str,
}

/// How a token matched a definition, carrying the setting it targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matched {
    /// Boolean flag, set (`true`) or negated (`false`).
    Bool(BoolSetting, bool),
    /// Value after the `=` or `:` separator.
    String(StringSetting, String),
    Enum(EnumSetting, String),
    /// Raw suffix after the flag name; the callback interprets it.
    Callback(Callback, String),
}

impl FlagDef {
    /// All long spellings, primary first.
    pub fn spellings(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.long).chain(self.synonyms.iter().copied())
    }

    /// Check if this definition matches the given argument string.
    pub fn match_token(&self, arg: &str) -> Option<Matched> {
        match self.kind {
            FlagKind::Bool(setting) => {
                if self.short == Some(arg) || self.spellings().any(|s| s == arg) {
                    return Some(Matched::Bool(setting, true));
                }
                let rest = arg
                    .strip_prefix("--no-")
                    .or_else(|| arg.strip_prefix("--no_"))?;
                self.spellings()
                    .any(|s| s.strip_prefix("--") == Some(rest))
                    .then_some(Matched::Bool(setting, false))
            }
            FlagKind::String(setting) => self
                .separated_value(arg)
                .map(|v| Matched::String(setting, v)),
            FlagKind::Enum(setting) => self
                .separated_value(arg)
                .map(|v| Matched::Enum(setting, v)),
            FlagKind::Callback(cb) => {
                let long = self.spellings().find_map(|s| arg.strip_prefix(s));
                if let Some(suffix) = long.filter(|suffix| cb.accepts_suffix(suffix)) {
                    return Some(Matched::Callback(cb, suffix.to_string()));
                }
                // Short forms glue the value on directly: -Dname=value.
                let short = self.short.and_then(|s| arg.strip_prefix(s))?;
                let suffix = format!("={short}");
                cb.accepts_suffix(&suffix)
                    .then_some(Matched::Callback(cb, suffix))
            }
        }
    }

    /// `--name=<value>` or `--name:<value>`.
    fn separated_value(&self, arg: &str) -> Option<String> {
        self.spellings().find_map(|s| {
            let rest = arg.strip_prefix(s)?;
            rest.strip_prefix('=')
                .or_else(|| rest.strip_prefix(':'))
                .map(str::to_string)
        })
    }
}

const fn runtime(
    long: &'static str,
    synonyms: &'static [&'static str],
    kind: FlagKind,
    description: &'static str,
) -> FlagDef {
    FlagDef {
        long,
        synonyms,
        short: None,
        kind,
        role: FlagRole::Runtime,
        description,
    }
}

/// Build the complete flag registry.
pub fn flag_registry() -> Vec<FlagDef> {
    use BoolSetting as B;
    use FlagKind::{Bool, Callback as Cb, Enum, String as Str};
    use StringSetting as S;

    vec![
        // === String options ===
        runtime("--packages", &[], Str(S::Packages), "Where to find a package spec file"),
        runtime("--namespace", &[], Str(S::Namespace), "Root directory for dart:io calls"),
        runtime("--snapshot", &[], Str(S::Snapshot), "File the generated snapshot is written to"),
        runtime("--depfile", &[], Str(S::Depfile), "Write a dependency file"),
        runtime(
            "--depfile-output-filename",
            &["--depfile_output_filename"],
            Str(S::DepfileOutputFilename),
            "Output named in the dependency file",
        ),
        runtime(
            "--snapshot-depfile",
            &["--snapshot_depfile"],
            Str(S::SnapshotDepfile),
            "Deprecated alias of --depfile",
        ),
        runtime("--root-certs-file", &["--root_certs_file"], Str(S::RootCertsFile), "Trusted root certificates file"),
        runtime("--root-certs-cache", &["--root_certs_cache"], Str(S::RootCertsCache), "Trusted root certificates directory"),
        runtime(
            "--write-service-info",
            &["--write_service_info"],
            Str(S::WriteServiceInfo),
            "Write VM service connection info to a file",
        ),
        runtime(
            "--save-compilation-trace",
            &["--save_compilation_trace"],
            Str(S::SaveCompilationTrace),
            "Save a compilation trace",
        ),
        runtime(
            "--load-compilation-trace",
            &["--load_compilation_trace"],
            Str(S::LoadCompilationTrace),
            "Load a compilation trace",
        ),
        runtime("--save-type-feedback", &["--save_type_feedback"], Str(S::SaveTypeFeedback), "Save type feedback"),
        runtime("--load-type-feedback", &["--load_type_feedback"], Str(S::LoadTypeFeedback), "Load type feedback"),
        runtime("--dfe", &[], Str(S::Dfe), "Frontend used to compile sources"),
        // === Enum options ===
        runtime(
            "--snapshot-kind",
            &["--snapshot_kind"],
            Enum(EnumSetting::SnapshotKind),
            "Kind of snapshot to generate: none, kernel or app-jit",
        ),
        // === Bool options ===
        runtime("--version", &[], Bool(B::Version), "Print the SDK version"),
        runtime("--dependencies-only", &["--dependencies_only"], Bool(B::DependenciesOnly), "Only compute dependencies"),
        runtime("--print-dependencies", &["--print_dependencies"], Bool(B::PrintDependencies), "Print script dependencies"),
        runtime("--trace-loading", &["--trace_loading"], Bool(B::TraceLoading), "Trace library and script loading"),
        runtime("--deterministic", &[], Bool(B::Deterministic), "Deterministic execution"),
        runtime("--short-socket-read", &["--short_socket_read"], Bool(B::ShortSocketRead), "Short socket reads"),
        runtime("--short-socket-write", &["--short_socket_write"], Bool(B::ShortSocketWrite), "Short socket writes"),
        runtime("--disable-exit", &["--disable_exit"], Bool(B::DisableExit), "Ignore exit calls"),
        runtime(
            "--enable-service-port-fallback",
            &["--enable_service_port_fallback"],
            Bool(B::EnableServicePortFallback),
            "Fall back to port 0 if the VM service port is taken",
        ),
        runtime(
            "--disable-service-auth-codes",
            &["--disable_service_auth_codes"],
            Bool(B::DisableServiceAuthCodes),
            "Disable VM service authentication codes",
        ),
        runtime("--suppress-core-dump", &["--suppress_core_dump"], Bool(B::SuppressCoreDump), "Suppress core dumps"),
        runtime("--enable-asserts", &["--enable_asserts"], Bool(B::Engine), "Enable assert statements"),
        FlagDef {
            long: "--help",
            synonyms: &[],
            short: Some("-h"),
            kind: Bool(B::Help),
            role: FlagRole::Runtime,
            description: "Display usage",
        },
        FlagDef {
            long: "--verbose",
            synonyms: &[],
            short: Some("-v"),
            kind: Bool(B::Verbose),
            role: FlagRole::Runtime,
            description: "Verbose usage",
        },
        // === Callback options ===
        runtime("--enable-vm-service", &["--enable_vm_service"], Cb(Callback::VmService), "Enable the VM service"),
        runtime("--observe", &[], Cb(Callback::Observe), "Enable the VM service with debugging defaults"),
        runtime("--use_abi_version", &["--use-abi-version"], Cb(Callback::AbiVersion), "Target ABI version"),
        runtime(
            "--enable-experiment",
            &["--enable_experiment"],
            Cb(Callback::EnableExperiment),
            "Enable language experiments",
        ),
        runtime("--enable-dart-dev", &["--enable_dart_dev"], Cb(Callback::EnableDevTool), "Use the dev-tool"),
        runtime("--disable-dart-dev", &["--disable_dart_dev"], Cb(Callback::DisableDevTool), "Never use the dev-tool"),
        FlagDef {
            long: "--define",
            synonyms: &[],
            short: Some("-D"),
            kind: Cb(Callback::Define),
            role: FlagRole::Runtime,
            description: "Define an environment declaration",
        },
        runtime(
            "--hot-reload-test-mode",
            &["--hot_reload_test_mode"],
            Cb(Callback::HotReloadTestMode),
            "Reload continuously while running",
        ),
        runtime(
            "--hot-reload-rollback-test-mode",
            &["--hot_reload_rollback_test_mode"],
            Cb(Callback::HotReloadRollbackTestMode),
            "Reload continuously and force rollbacks",
        ),
        // === Dual-purpose flags (observed here and forwarded) ===
        FlagDef {
            long: "--print-flags",
            synonyms: &["--print_flags"],
            short: None,
            kind: Bool(B::PrintFlags),
            role: FlagRole::DualPurpose,
            description: "Print runtime flags",
        },
        FlagDef {
            long: "--verbose-debug",
            synonyms: &["--verbose_debug"],
            short: None,
            kind: Bool(B::VerboseDebug),
            role: FlagRole::DualPurpose,
            description: "Verbose debugging output",
        },
        // === Dev-tool-only flags ===
        FlagDef {
            long: "--enable-analytics",
            synonyms: &["--enable_analytics"],
            short: None,
            kind: Bool(B::EnableAnalytics),
            role: FlagRole::DevToolOnly,
            description: "Enable dev-tool analytics",
        },
        FlagDef {
            long: "--disable-analytics",
            synonyms: &["--disable_analytics"],
            short: None,
            kind: Bool(B::DisableAnalytics),
            role: FlagRole::DevToolOnly,
            description: "Disable dev-tool analytics",
        },
    ]
}
