use std::fs;
use std::path::Path;

use xinput_bridge::backends::abi::{RawState, RawVibration, ERROR_DEVICE_NOT_CONNECTED};
use xinput_bridge::{
    Candidate, ControllerApi, LoadError, Loader, LoaderConfig, PlatformKey, Step, Target,
    XInputBackend, XInputFns,
};

unsafe extern "system" fn nothing_connected(_index: u32, _out: *mut RawState) -> u32 {
    ERROR_DEVICE_NOT_CONNECTED
}

unsafe extern "system" fn no_rumble(_index: u32, _v: *mut RawVibration) -> u32 {
    ERROR_DEVICE_NOT_CONNECTED
}

fn fake_open(candidate: &Candidate) -> Result<XInputBackend, LoadError> {
    let fns = XInputFns {
        get_state: nothing_connected,
        set_state: no_rumble,
        get_battery_information: None,
    };
    // SAFETY: the fakes never dereference their pointers.
    Ok(unsafe { XInputBackend::from_fns(fns, candidate.target.to_string()) })
}

fn windows_config(root: &Path) -> LoaderConfig {
    LoaderConfig {
        prebuild_dir: root.join("prebuilds"),
        local_build_dir: root.join("build").join("Release"),
        platform: PlatformKey::new("windows", "x86_64"),
        ..LoaderConfig::default()
    }
}

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"MZ").unwrap();
}

#[test]
fn tolerated_prebuild_name_wins_over_later_steps() {
    let dir = tempfile::tempdir().unwrap();
    let prebuilt = dir
        .path()
        .join("prebuilds")
        .join("windows-x86_64")
        .join("xinput1_3.dll");
    touch(&prebuilt);
    touch(&dir.path().join("build/Release/xinput.dll"));

    let mut opened = Vec::new();
    let loaded = Loader::new(windows_config(dir.path())).load_with(|c| {
        opened.push(c.clone());
        fake_open(c)
    });

    let chosen = loaded.chosen.expect("a candidate was chosen");
    assert_eq!(chosen.step, Step::Prebuilt);
    assert_eq!(chosen.target, Target::Path(prebuilt.clone()));
    assert_eq!(opened, vec![chosen]);
    assert!(loaded.backend.is_available());
    assert_eq!(loaded.backend.describe(), prebuilt.display().to_string());
    // xinput.dll and xinput1_4.dll were tried first and are missing.
    assert_eq!(loaded.failures.len(), 2);
    assert!(loaded
        .failures
        .iter()
        .all(|f| matches!(f.error, LoadError::NotFound(_))));
}

#[test]
fn system_search_follows_a_broken_prebuild() {
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("prebuilds/windows-x86_64/xinput.dll"));

    let loaded = Loader::new(windows_config(dir.path())).load_with(|c| match &c.target {
        Target::Path(_) => Err(LoadError::MissingSymbol {
            target: c.target.to_string(),
            symbol: "XInputGetState",
        }),
        Target::Name(_) => fake_open(c),
    });

    let chosen = loaded.chosen.expect("system search succeeded");
    assert_eq!(chosen.step, Step::SystemSearch);
    assert_eq!(chosen.target, Target::Name("xinput1_4.dll".into()));
    assert!(matches!(
        loaded.failures[0].error,
        LoadError::MissingSymbol { .. }
    ));
}

#[test]
fn local_build_is_the_last_resort() {
    let dir = tempfile::tempdir().unwrap();
    let local = dir.path().join("build/Release/xinput.dll");
    touch(&local);

    let loaded = Loader::new(windows_config(dir.path())).load_with(|c| match c.step {
        Step::SystemSearch => Err(LoadError::MissingSymbol {
            target: c.target.to_string(),
            symbol: "XInputSetState",
        }),
        _ => fake_open(c),
    });

    let chosen = loaded.chosen.expect("local build succeeded");
    assert_eq!(chosen.step, Step::LocalBuild);
    assert_eq!(chosen.target, Target::Path(local));
}

#[test]
fn everything_failing_yields_a_callable_stub() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = Loader::new(windows_config(dir.path())).load_with(|_| Err(LoadError::Unsupported));

    assert!(loaded.backend.is_stub());
    assert!(!loaded.backend.is_available());
    assert!(loaded.backend.connected_controllers().is_empty());
    assert!(!loaded.backend.set_vibration(0, 1.0, 1.0));
    let plan_len = Loader::new(windows_config(dir.path())).plan().len();
    assert_eq!(loaded.failures.len(), plan_len);
}

#[test]
fn non_windows_platform_goes_straight_to_stub() {
    let cfg = LoaderConfig {
        platform: PlatformKey::new("macos", "aarch64"),
        ..LoaderConfig::default()
    };
    let loaded = Loader::new(cfg).load_with(|_| panic!("opener must not run"));
    assert!(loaded.backend.is_stub());
    assert!(loaded.failures.is_empty());
}

#[cfg(not(target_os = "windows"))]
#[test]
fn default_load_is_unavailable_off_windows() {
    let pads = xinput_bridge::load();
    assert!(!pads.is_available());
    assert!(pads.controller_state(0).gamepad().is_none());
}

#[test]
fn config_file_round_trips_through_loader() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("loader.toml");
    fs::write(
        &path,
        r#"
        prebuild_dir = "vendor"
        system_names = []
        prebuild_names = ["pad.dll"]

        [platform]
        os = "windows"
        arch = "aarch64"
        "#,
    )
    .unwrap();

    let cfg = LoaderConfig::from_file(&path).unwrap();
    let plan = Loader::new(cfg).plan();
    assert_eq!(plan.len(), 2);
    assert_eq!(
        plan[0].target,
        Target::Path(
            std::path::absolute(Path::new("vendor").join("windows-aarch64").join("pad.dll"))
                .unwrap()
        )
    );
    assert_eq!(plan[1].step, Step::LocalBuild);
}
