//! Consistency checks over snapshot and depfile options.

use crate::args::options::{LaunchOptions, SnapshotKind};
use crate::error::ConsistencyError;

/// Check option combinations once dispatch has picked something to run.
///
/// Checks run in a fixed order and the first failure wins. Fields touched by
/// earlier steps (the depfile alias) are not rolled back on failure.
pub fn check_consistency(
    options: &mut LaunchOptions,
    run_from_app_snapshot: bool,
) -> Result<(), ConsistencyError> {
    if options.snapshot_depfile.is_some() && options.depfile.is_some() {
        return Err(ConsistencyError::DuplicateDepfile);
    }
    if let Some(alias) = options.snapshot_depfile.take() {
        options.depfile = Some(alias);
    }

    if options.packages_file.as_deref() == Some("") {
        return Err(ConsistencyError::EmptyPackagesFile);
    }

    let generating = options.snapshot_kind != SnapshotKind::None;
    if generating && options.snapshot_filename.is_none() {
        return Err(ConsistencyError::SnapshotWithoutFilename);
    }
    if !generating
        && options.depfile.is_some()
        && options.snapshot_filename.is_none()
        && options.depfile_output_filename.is_none()
    {
        return Err(ConsistencyError::DepfileWithoutOutput);
    }
    if generating && run_from_app_snapshot {
        return Err(ConsistencyError::SnapshotAndRunFromSnapshot);
    }

    if options.snapshot_filename.is_some() && !generating {
        options.snapshot_kind = SnapshotKind::Kernel;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(options: &mut LaunchOptions) -> Result<(), ConsistencyError> {
        check_consistency(options, false)
    }

    #[test]
    fn defaults_pass() {
        let mut options = LaunchOptions::default();
        assert_eq!(check(&mut options), Ok(()));
        assert_eq!(options.snapshot_kind, SnapshotKind::None);
    }

    #[test]
    fn depfile_and_alias_conflict() {
        let mut options = LaunchOptions {
            depfile: Some("a.d".into()),
            snapshot_depfile: Some("b.d".into()),
            snapshot_filename: Some("out.snap".into()),
            ..LaunchOptions::default()
        };
        assert_eq!(check(&mut options), Err(ConsistencyError::DuplicateDepfile));
    }

    #[test]
    fn alias_moves_into_depfile() {
        let mut options = LaunchOptions {
            snapshot_depfile: Some("b.d".into()),
            snapshot_filename: Some("out.snap".into()),
            ..LaunchOptions::default()
        };
        assert_eq!(check(&mut options), Ok(()));
        assert_eq!(options.depfile.as_deref(), Some("b.d"));
        assert_eq!(options.snapshot_depfile, None);
    }

    #[test]
    fn empty_packages_file() {
        let mut options = LaunchOptions {
            packages_file: Some(String::new()),
            ..LaunchOptions::default()
        };
        assert_eq!(check(&mut options), Err(ConsistencyError::EmptyPackagesFile));
    }

    #[test]
    fn snapshot_kind_needs_filename() {
        let mut options = LaunchOptions {
            snapshot_kind: SnapshotKind::AppJit,
            ..LaunchOptions::default()
        };
        let err = check(&mut options).unwrap_err();
        assert_eq!(err, ConsistencyError::SnapshotWithoutFilename);
        assert!(err.to_string().contains("requires a filename"));
    }

    #[test]
    fn depfile_needs_output() {
        let mut options = LaunchOptions {
            depfile: Some("a.d".into()),
            ..LaunchOptions::default()
        };
        assert_eq!(check(&mut options), Err(ConsistencyError::DepfileWithoutOutput));

        let mut options = LaunchOptions {
            depfile: Some("a.d".into()),
            depfile_output_filename: Some("out".into()),
            ..LaunchOptions::default()
        };
        assert_eq!(check(&mut options), Ok(()));
    }

    #[test]
    fn generating_while_running_from_snapshot() {
        let mut options = LaunchOptions {
            snapshot_kind: SnapshotKind::Kernel,
            snapshot_filename: Some("out.snap".into()),
            ..LaunchOptions::default()
        };
        assert_eq!(
            check_consistency(&mut options, true),
            Err(ConsistencyError::SnapshotAndRunFromSnapshot)
        );
    }

    #[test]
    fn snapshot_filename_defaults_kind_to_kernel() {
        let mut options = LaunchOptions {
            snapshot_filename: Some("out.snap".into()),
            ..LaunchOptions::default()
        };
        assert_eq!(check(&mut options), Ok(()));
        assert_eq!(options.snapshot_kind, SnapshotKind::Kernel);
    }

    #[test]
    fn first_failure_wins() {
        let mut options = LaunchOptions {
            packages_file: Some(String::new()),
            snapshot_kind: SnapshotKind::AppJit,
            ..LaunchOptions::default()
        };
        assert_eq!(check(&mut options), Err(ConsistencyError::EmptyPackagesFile));
    }
}
