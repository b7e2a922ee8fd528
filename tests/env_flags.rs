//! Boolean switches read from the environment.
//!
//! Kept as the only test in this binary: it mutates the process environment.

use clap::Parser;
use docker_image_builder::cli::args::Args;

fn parse_switches() -> (bool, bool, bool) {
    let args = Args::try_parse_from(["docker-image-builder", "--timeout", "5"]).unwrap();
    (args.enable_push, args.debug, args.dry_run)
}

fn set_switches(enable_push: Option<&str>, debug: Option<&str>, dry_run: Option<&str>) {
    for (key, value) in [("ENABLE_PUSH", enable_push), ("DEBUG", debug), ("DRY_RUN", dry_run)] {
        // SAFETY: no other thread in this test binary reads the environment
        unsafe {
            match value {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }
        }
    }
}

#[test]
fn boolean_switches_follow_env_values() {
    set_switches(None, None, None);
    assert_eq!(parse_switches(), (false, false, false));

    set_switches(Some(""), Some(""), Some(""));
    assert_eq!(parse_switches(), (false, false, false));

    set_switches(Some("yes"), Some(""), Some("0"));
    assert_eq!(parse_switches(), (true, false, false));

    for falsey in ["0", "false", "FALSE", "no", "off", "n", "f"] {
        set_switches(Some(falsey), Some(falsey), Some(falsey));
        assert_eq!(parse_switches(), (false, false, false), "value {:?}", falsey);
    }

    for truthy in ["1", "true", "yes", "on", "anything"] {
        set_switches(Some(truthy), Some(truthy), Some(truthy));
        assert_eq!(parse_switches(), (true, true, true), "value {:?}", truthy);
    }

    // Flags win over a falsey environment
    set_switches(Some("0"), None, None);
    let args =
        Args::try_parse_from(["docker-image-builder", "--timeout", "5", "--enable-push"]).unwrap();
    assert!(args.enable_push);

    set_switches(None, None, None);
}
