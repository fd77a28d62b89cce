//! Preflight orchestration.
//!
//! Runs the three independent preparation steps (storage permission
//! normalization, Laravel environment check, template compilation) once
//! per process start. The steps share no state and run concurrently; all
//! are joined before the managed server is allowed to start, and each
//! step's policy decides whether its failure aborts the preflight.

use crate::config::{Config, StepPolicy};
use crate::env::EnvSnapshot;
use crate::error::Result;
use crate::fs::chmod_recursive;
use crate::laravel;
use crate::logger::Logger;
use crate::nix::CommandResolver;
use crate::template;
use std::path::Path;
use std::thread;

/// Run the full preflight for one process start.
///
/// Returns once the expanded configuration has been written and every
/// other step has completed. Fatal step failures are reported in a fixed
/// order (template, environment check, permissions) regardless of which
/// thread finished first.
pub fn run(
    template_file: &Path,
    output_file: &Path,
    config: &Config,
    env: &EnvSnapshot,
    resolver: &dyn CommandResolver,
) -> Result<()> {
    let laravel_logger = Logger::new("laravel");

    let (compile, env_check, permissions) = thread::scope(|scope| {
        let permissions = scope.spawn(|| chmod_recursive(&config.storage_dir));

        let env_check = scope.spawn(|| {
            if laravel::is_laravel(env) {
                laravel::check_env(&config.app_root, env, &laravel_logger)
            } else {
                Ok(())
            }
        });

        let compile =
            scope.spawn(|| template::compile_template(template_file, output_file, env, resolver));

        (join(compile), join(env_check), join(permissions))
    });

    apply_policy(compile, config.template)?;
    apply_policy(env_check, config.env_check)?;
    apply_policy(permissions, config.permissions)?;

    Logger::new("server").info(format!(
        "Server starting on port {}",
        env.get("PORT").unwrap_or_default()
    ));

    Ok(())
}

/// A panicking step is a bug, not a policy matter; propagate the unwind.
fn join(handle: thread::ScopedJoinHandle<'_, Result<()>>) -> Result<()> {
    match handle.join() {
        Ok(result) => result,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

fn apply_policy(result: Result<()>, policy: StepPolicy) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(err) if policy.fail_fast => Err(err),
        Err(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrestartError;
    use crate::test_support::{MapResolver, env};
    use std::fs;
    use tempfile::TempDir;

    /// Config whose paths live inside the given temp dir.
    fn config_in(dir: &TempDir) -> Config {
        Config {
            app_root: dir.path().join("app"),
            storage_dir: dir.path().join("app").join("storage"),
            ..Config::default()
        }
    }

    #[test]
    fn full_preflight_expands_all_three_macro_kinds() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let template_file = dir.path().join("nginx.template.conf");
        let output_file = dir.path().join("nginx.conf");
        fs::write(
            &template_file,
            "listen ${PORT};\ngzip $if (GZIP) (on) else (off);\nexec $!{nginx};\n",
        )
        .unwrap();

        run(
            &template_file,
            &output_file,
            &config,
            &env(&[("PORT", "8080")]),
            &MapResolver::with(&[("nginx", "/nix/store/def456-nginx-1.25")]),
        )
        .unwrap();

        assert_eq!(
            fs::read_to_string(&output_file).unwrap(),
            "listen 8080;\ngzip off;\nexec /nix/store/def456-nginx-1.25;\n"
        );
    }

    #[test]
    #[cfg(unix)]
    fn storage_permissions_are_normalized_when_present() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        fs::create_dir_all(&config.storage_dir).unwrap();
        fs::write(config.storage_dir.join("app.log"), "line").unwrap();

        let template_file = dir.path().join("in.conf");
        fs::write(&template_file, "plain").unwrap();

        run(
            &template_file,
            &dir.path().join("out.conf"),
            &config,
            &env(&[]),
            &MapResolver::empty(),
        )
        .unwrap();

        let mode = fs::metadata(config.storage_dir.join("app.log"))
            .unwrap()
            .permissions()
            .mode()
            & 0o777;
        assert_eq!(mode, 0o666);
    }

    #[test]
    fn missing_storage_directory_does_not_fail_the_preflight() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let template_file = dir.path().join("in.conf");
        fs::write(&template_file, "plain").unwrap();

        run(
            &template_file,
            &dir.path().join("out.conf"),
            &config,
            &env(&[]),
            &MapResolver::empty(),
        )
        .unwrap();
    }

    #[test]
    fn missing_template_fails_the_preflight() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let err = run(
            &dir.path().join("absent.conf"),
            &dir.path().join("out.conf"),
            &config,
            &env(&[]),
            &MapResolver::empty(),
        )
        .unwrap_err();

        assert!(matches!(err, PrestartError::Template(_)));
    }

    #[test]
    fn resolution_failure_fails_the_preflight() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let template_file = dir.path().join("in.conf");
        fs::write(&template_file, "exec $!{nginx};").unwrap();

        let err = run(
            &template_file,
            &dir.path().join("out.conf"),
            &config,
            &env(&[]),
            &MapResolver::empty(),
        )
        .unwrap_err();

        assert!(matches!(err, PrestartError::Resolve(_)));
    }

    #[test]
    fn laravel_check_runs_only_when_flagged() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        // No app/config directory exists, so the check would fail if run.

        let template_file = dir.path().join("in.conf");
        fs::write(&template_file, "plain").unwrap();

        run(
            &template_file,
            &dir.path().join("out.conf"),
            &config,
            &env(&[]),
            &MapResolver::empty(),
        )
        .unwrap();
    }

    #[test]
    fn missing_config_directory_fails_a_flagged_laravel_app() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let template_file = dir.path().join("in.conf");
        fs::write(&template_file, "plain").unwrap();

        let err = run(
            &template_file,
            &dir.path().join("out.conf"),
            &config,
            &env(&[("IS_LARAVEL", "1")]),
            &MapResolver::empty(),
        )
        .unwrap_err();

        assert!(matches!(err, PrestartError::EnvScan(_)));
    }

    #[test]
    fn env_check_failure_can_be_downgraded_by_policy() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir);
        config.env_check = StepPolicy::best_effort();

        let template_file = dir.path().join("in.conf");
        fs::write(&template_file, "plain").unwrap();

        run(
            &template_file,
            &dir.path().join("out.conf"),
            &config,
            &env(&[("IS_LARAVEL", "1")]),
            &MapResolver::empty(),
        )
        .unwrap();
    }

    #[test]
    fn template_is_written_even_when_another_step_fails() {
        // The steps are independent; partial output is expected.
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let template_file = dir.path().join("in.conf");
        let output_file = dir.path().join("out.conf");
        fs::write(&template_file, "port ${PORT}").unwrap();

        let result = run(
            &template_file,
            &output_file,
            &config,
            &env(&[("IS_LARAVEL", "1"), ("PORT", "80")]),
            &MapResolver::empty(),
        );

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&output_file).unwrap(), "port 80");
    }

    #[test]
    fn apply_policy_swallows_when_not_fail_fast() {
        let err = Err(PrestartError::Permissions("denied".to_string()));
        assert!(apply_policy(err, StepPolicy::best_effort()).is_ok());

        let err = Err(PrestartError::Permissions("denied".to_string()));
        assert!(apply_policy(err, StepPolicy::fatal()).is_err());

        assert!(apply_policy(Ok(()), StepPolicy::fatal()).is_ok());
    }
}
