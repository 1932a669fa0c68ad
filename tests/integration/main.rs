//! Integration tests for Sprint

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    fn sprint() -> Command {
        let mut cmd = cargo_bin_cmd!("sprint");
        cmd.env("SPRINT_CONFIG", "/nonexistent/sprint/config.toml");
        cmd.env_remove("RUST_LOG");
        cmd
    }

    #[test]
    fn help_displays() {
        sprint()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("annotated .NET source file"))
            .stdout(predicate::str::contains("prepare"))
            .stdout(predicate::str::contains("watch"));
    }

    #[test]
    fn graduate_is_hidden_from_help() {
        sprint()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("graduate").not());
    }

    #[test]
    fn version_displays() {
        sprint()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("sprint"));
    }

    #[test]
    fn file_argument_required() {
        sprint().assert().failure();
    }

    #[test]
    fn missing_file() {
        let temp = TempDir::new().unwrap();
        sprint()
            .arg(temp.path().join("nope.cs"))
            .assert()
            .code(255)
            .stderr(predicate::str::contains("File nope.cs does not exist."));
    }

    #[test]
    fn unsupported_extension() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("script.py");
        std::fs::write(&file, "print('hi')").unwrap();

        sprint()
            .arg(&file)
            .assert()
            .code(254)
            .stderr(predicate::str::contains("File extension .py is not supported."))
            .stderr(predicate::str::contains("Supported extensions are: .cs, .vb, .fs"));
    }

    #[test]
    fn invalid_config_is_reported() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("config.toml");
        std::fs::write(&config, "[watch]\ndebounce_ms = \"soon\"\n").unwrap();

        cargo_bin_cmd!("sprint")
            .arg("--config")
            .arg(&config)
            .arg("hello.cs")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Invalid configuration"));
    }
}

#[cfg(unix)]
mod toolchain_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Source directory, workspace root and a stub `dotnet` that logs its
    /// arguments
    struct Fixture {
        _temp: TempDir,
        src: PathBuf,
        root: PathBuf,
        log: PathBuf,
        config: PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let temp = TempDir::new().unwrap();
            let base = temp.path().canonicalize().unwrap();
            let src = base.join("src");
            let root = base.join("cache");
            std::fs::create_dir_all(&src).unwrap();
            std::fs::create_dir_all(&root).unwrap();

            let log = base.join("invocations.log");
            let stub = base.join("dotnet-stub");
            let script = format!(
                r#"#!/bin/sh
echo "$*" >> "{log}"
case "$1" in
  msbuild) echo "restore output from $PWD" ;;
  build) echo "build output from $PWD"; exit "${{STUB_BUILD_EXIT:-0}}" ;;
  run) echo "hello from stub"; exit "${{STUB_RUN_EXIT:-0}}" ;;
esac
exit 0
"#,
                log = log.display()
            );
            std::fs::write(&stub, script).unwrap();
            std::fs::set_permissions(&stub, std::fs::Permissions::from_mode(0o755)).unwrap();

            let config = base.join("config.toml");
            std::fs::write(
                &config,
                format!(
                    "[cache]\nroot = \"{}\"\n\n[toolchain]\nprogram = \"{}\"\n",
                    root.display(),
                    stub.display()
                ),
            )
            .unwrap();

            Self {
                _temp: temp,
                src,
                root,
                log,
                config,
            }
        }

        fn source(&self, name: &str, content: &str) -> PathBuf {
            let path = self.src.join(name);
            std::fs::write(&path, content).unwrap();
            path
        }

        fn sprint(&self) -> Command {
            let mut cmd = cargo_bin_cmd!("sprint");
            cmd.env("SPRINT_CONFIG", &self.config);
            cmd.env_remove("RUST_LOG");
            cmd
        }

        fn invocations(&self) -> Vec<String> {
            std::fs::read_to_string(&self.log)
                .unwrap_or_default()
                .lines()
                .map(String::from)
                .collect()
        }

        fn workspace(&self) -> PathBuf {
            let mut dirs: Vec<_> = std::fs::read_dir(&self.root)
                .unwrap()
                .map(|e| e.unwrap().path())
                .collect();
            assert_eq!(dirs.len(), 1, "expected one workspace: {dirs:?}");
            dirs.remove(0)
        }
    }

    fn starts_with(lines: &[String], prefixes: &[&str]) -> bool {
        lines.len() == prefixes.len()
            && lines.iter().zip(prefixes).all(|(l, p)| l.starts_with(p))
    }

    #[test]
    fn prepare_generates_workspace_once() {
        let fx = Fixture::new();
        let file = fx.source(
            "hello.cs",
            "// nuget: Humanizer 2.14.1\n// targetframework: net8.0\nSystem.Console.WriteLine(1);\n",
        );

        fx.sprint().arg("prepare").arg(&file).assert().success();
        assert!(starts_with(&fx.invocations(), &["msbuild -t:restore"]));

        let ws = fx.workspace();
        let project = std::fs::read_to_string(ws.join("temp.csproj")).unwrap();
        assert!(project.contains("<TargetFramework>net8.0</TargetFramework>"));
        assert!(project.contains(r#"<PackageReference Include="Humanizer" Version="2.14.1" />"#));
        assert_eq!(
            std::fs::read_to_string(ws.join("hello.cs")).unwrap(),
            std::fs::read_to_string(&file).unwrap()
        );
        assert!(ws.join("previous.hash").exists());

        // Unchanged source: nothing to restore
        fx.sprint().arg("prepare").arg(&file).assert().success();
        assert_eq!(fx.invocations().len(), 1);
    }

    #[test]
    fn edit_triggers_rebuild() {
        let fx = Fixture::new();
        let file = fx.source("hello.cs", "class P {}\n");

        fx.sprint().arg("prepare").arg(&file).assert().success();
        std::fs::write(&file, "class P { }\n").unwrap();
        fx.sprint().arg("prepare").arg(&file).assert().success();

        assert_eq!(fx.invocations().len(), 2);
    }

    #[test]
    fn run_executes_program() {
        let fx = Fixture::new();
        let file = fx.source("hello.cs", "System.Console.WriteLine(1);\n");

        fx.sprint()
            .arg(&file)
            .assert()
            .success()
            .stdout(predicate::str::contains("hello from stub"))
            .stdout(predicate::str::contains("restore output").not())
            .stdout(predicate::str::contains("build output").not());

        assert!(starts_with(
            &fx.invocations(),
            &["msbuild -t:restore", "build -nologo", "run --no-build --project"]
        ));

        // Second run skips preparation but still runs
        fx.sprint().arg(&file).assert().success();
        let calls = fx.invocations();
        assert_eq!(calls.len(), 4);
        assert!(calls[3].starts_with("run --no-build"));
    }

    #[test]
    fn run_propagates_program_exit_code() {
        let fx = Fixture::new();
        let file = fx.source("hello.fs", "printfn \"hi\"\n");

        fx.sprint().arg(&file).env("STUB_RUN_EXIT", "42").assert().code(42);
        assert!(fx.workspace().join("temp.fsproj").exists());
    }

    #[test]
    fn build_failure_stops_before_run() {
        let fx = Fixture::new();
        let file = fx.source("broken.cs", "class {\n");

        fx.sprint()
            .arg(&file)
            .env("STUB_BUILD_EXIT", "3")
            .assert()
            .code(3)
            .stdout(predicate::str::contains(format!("build output from {}", fx.src.display())));

        let calls = fx.invocations();
        assert_eq!(calls.len(), 2);
        assert!(!calls.iter().any(|c| c.starts_with("run")));
    }

    #[test]
    fn verbose_echoes_tool_output() {
        let fx = Fixture::new();
        let file = fx.source("hello.cs", "class P {}\n");

        fx.sprint()
            .args(["prepare", "--verbose"])
            .arg(&file)
            .assert()
            .success()
            .stdout(predicate::str::contains("restore output"));
    }

    #[test]
    fn binlog_goes_next_to_source() {
        let fx = Fixture::new();
        let file = fx.source("hello.cs", "class P {}\n");

        fx.sprint().arg("-b").arg(&file).assert().success();

        let calls = fx.invocations();
        let restore_log = fx.src.join("hello.restore.binlog");
        let build_log = fx.src.join("hello.binlog");
        assert!(calls[0].contains(&format!("-bl:{}", restore_log.display())));
        assert!(calls[1].contains(&format!("-bl:{}", build_log.display())));
    }

    #[test]
    fn visual_basic_project_file() {
        let fx = Fixture::new();
        let file = fx.source("Tool.vb", "' sdk: Microsoft.NET.Sdk.Worker\nModule M\nEnd Module\n");

        fx.sprint().arg("prepare").arg(&file).assert().success();

        let project = std::fs::read_to_string(fx.workspace().join("temp.vbproj")).unwrap();
        assert!(project.starts_with(r#"<Project Sdk="Microsoft.NET.Sdk.Worker">"#));
    }

    #[test]
    fn graduate_is_not_available() {
        let fx = Fixture::new();
        let file = fx.source("hello.cs", "class P {}\n");

        fx.sprint()
            .arg("graduate")
            .arg(&file)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("not implemented"));
        assert!(fx.invocations().is_empty());
    }

    #[test]
    fn missing_toolchain_is_reported() {
        let fx = Fixture::new();
        let file = fx.source("hello.cs", "class P {}\n");
        let config = fx.root.parent().unwrap().join("missing-toolchain.toml");
        std::fs::write(
            &config,
            format!(
                "[cache]\nroot = \"{}\"\n\n[toolchain]\nprogram = \"/nonexistent/dotnet\"\n",
                fx.root.display()
            ),
        )
        .unwrap();

        cargo_bin_cmd!("sprint")
            .env("SPRINT_CONFIG", &config)
            .arg(&file)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Command failed"));
    }
}
