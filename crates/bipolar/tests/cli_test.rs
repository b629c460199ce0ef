/// End-to-end tests of the subcommands against config files on disk
use anyhow::Result;
use bipolar::cli::{
    MachineArgs, forward::ForwardArgs, inverse::InverseArgs, options::OptionsArgs,
    replay::ReplayArgs,
};
use bipolar_core::{ActuatorCoord, BipolarKin, KinematicsModel};
use std::{fs, path::PathBuf};
use tempfile::TempDir;

const BIPOLAR_TOML: &str = r#"
[kinematics]
geometry = "bipolar"
arm_length = 110.0

[log]
filter = "warn"
"#;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn machine(config: PathBuf, set: Vec<(char, f64)>, json: bool) -> MachineArgs {
    MachineArgs { config, set, json }
}

#[test]
fn test_inverse_pure() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write(&dir, "machine.toml", BIPOLAR_TOML);
    let target = BipolarKin::new(110.0).to_cartesian(&ActuatorCoord::new(30.0, 90.0, 2.0));

    let args = InverseArgs {
        machine: machine(config, vec![], false),
        x: target.x,
        y: target.y,
        z: target.z,
        current: None,
    };
    insta::assert_snapshot!(args.render()?, @"alpha=30.0000 beta=90.0000 gamma=2.0000");
    Ok(())
}

#[test]
fn test_inverse_unreachable_is_error() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write(&dir, "machine.toml", BIPOLAR_TOML);

    let args = InverseArgs {
        machine: machine(config, vec![], false),
        x: 300.0,
        y: 0.0,
        z: 0.0,
        current: None,
    };
    let err = args.render().unwrap_err();
    assert!(format!("{err:#}").contains("beyond reach of 220 mm"));
    Ok(())
}

#[test]
fn test_inverse_continuous_unwraps() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write(&dir, "machine.toml", BIPOLAR_TOML);
    let target = BipolarKin::new(110.0).to_cartesian(&ActuatorCoord::new(-170.0, 170.0, 0.0));

    let args = InverseArgs {
        machine: machine(config, vec![], false),
        x: target.x,
        y: target.y,
        z: 0.0,
        current: Some(vec![170.0, 170.0, 0.0]),
    };
    insta::assert_snapshot!(args.render()?, @"alpha=190.0000 beta=170.0000 gamma=0.0000");
    Ok(())
}

#[test]
fn test_inverse_continuous_degraded_json() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write(&dir, "machine.json", r#"{ "kinematics": { "arm_length": 110.0 } }"#);

    let args = InverseArgs {
        machine: machine(config, vec![], true),
        x: 0.0,
        y: 0.0,
        z: 1.0,
        current: Some(vec![37.0, 0.0, 1.0]),
    };
    insta::assert_snapshot!(
        args.render()?,
        @r#"{"alpha":37.0,"beta":0.0,"gamma":1.0,"status":"degraded","fault":"target radius 0 mm is inside the center singularity","held":"alpha"}"#
    );
    Ok(())
}

#[test]
fn test_raw_mode_passthrough() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write(&dir, "machine.toml", BIPOLAR_TOML);

    let inverse = InverseArgs {
        machine: machine(config.clone(), vec![('R', 1.0)], false),
        x: 5.0,
        y: 7.0,
        z: 9.0,
        current: None,
    };
    insta::assert_snapshot!(inverse.render()?, @"alpha=5.0000 beta=7.0000 gamma=9.0000");

    let forward = ForwardArgs {
        machine: machine(config, vec![('R', 1.0)], true),
        alpha: 5.0,
        beta: 7.0,
        gamma: 9.0,
    };
    insta::assert_snapshot!(forward.render()?, @r#"{"x":5.0,"y":7.0,"z":9.0}"#);
    Ok(())
}

#[test]
fn test_forward() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write(&dir, "machine.toml", BIPOLAR_TOML);

    let args = ForwardArgs {
        machine: machine(config, vec![], false),
        alpha: 0.0,
        beta: 90.0,
        gamma: 4.0,
    };
    insta::assert_snapshot!(args.render()?, @"x=110.0000 y=110.0000 z=4.0000");
    Ok(())
}

#[test]
fn test_options() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write(&dir, "machine.toml", BIPOLAR_TOML);

    let unset = OptionsArgs {
        machine: machine(config.clone(), vec![], false),
        all: false,
    };
    insta::assert_snapshot!(unset.render()?, @"{}");

    let all = OptionsArgs {
        machine: machine(config.clone(), vec![], false),
        all: true,
    };
    insta::assert_snapshot!(all.render()?, @r#"{"R":0.0}"#);

    let set = OptionsArgs {
        machine: machine(config.clone(), vec![('R', 1.0)], false),
        all: false,
    };
    insta::assert_snapshot!(set.render()?, @r#"{"R":1.0}"#);

    let unknown = OptionsArgs {
        machine: machine(config, vec![('Q', 1.0)], false),
        all: false,
    };
    let err = unknown.render().unwrap_err();
    assert!(err.to_string().contains("option `Q`"));
    Ok(())
}

#[test]
fn test_config_rejects_zero_arm_length() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write(&dir, "machine.toml", "[kinematics]\narm_length = 0.0\n");

    let args = ForwardArgs {
        machine: machine(config, vec![], false),
        alpha: 0.0,
        beta: 0.0,
        gamma: 0.0,
    };
    assert!(args.render().is_err());
    Ok(())
}

#[test]
fn test_replay() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write(&dir, "machine.toml", BIPOLAR_TOML);
    let first = BipolarKin::new(110.0).to_cartesian(&ActuatorCoord::new(30.0, 90.0, 0.0));
    let input = write(
        &dir,
        "targets.xyz",
        &format!(
            "; reachable start, then an unreachable point\n{} {} 0\n\n500 0 1\n",
            first.x, first.y
        ),
    );

    let args = ReplayArgs {
        machine: machine(config, vec![], false),
        input,
    };
    let output = args.render()?;
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "2: alpha=30.0000 beta=90.0000 gamma=0.0000");
    assert!(lines[1].starts_with("4: alpha=30.0000 beta=90.0000 gamma=1.0000 [degraded:"));
    Ok(())
}

#[test]
fn test_replay_cartesian_json() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write(&dir, "machine.toml", "[kinematics]\ngeometry = \"cartesian\"\n");
    let input = write(&dir, "targets.xyz", "1 2 3\n");

    let args = ReplayArgs {
        machine: machine(config, vec![], true),
        input,
    };
    insta::assert_snapshot!(
        args.render()?,
        @r#"{"alpha":1.0,"beta":2.0,"gamma":3.0,"status":"exact"}"#
    );
    Ok(())
}
