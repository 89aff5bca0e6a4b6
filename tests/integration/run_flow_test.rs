// End-to-end tests for the interactive download flow

use super::common::{file_names, touch, FakeProbe, Sandbox};
use bvdl::commands::download::{check_environment, run, Outcome, RunOptions};
use bvdl::core::{Destination, DownloaderSettings, MovedFile};
use bvdl::ui::{InputEvent, ScriptedInput};
use bvdl::BvdlError;

fn checked() -> RunOptions {
    RunOptions::default()
}

fn skip_check() -> RunOptions {
    RunOptions {
        skip_check: true,
        ..Default::default()
    }
}

#[test]
fn test_missing_required_tool_fails() {
    let sandbox = Sandbox::new();
    let probe = FakeProbe::with(&["ffmpeg"]);
    let mut input = ScriptedInput::new(vec![]);

    let err = run(&checked(), &sandbox.settings(), &mut input, &probe).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<BvdlError>(),
        Some(BvdlError::MissingDependency(tool)) if tool == "node"
    ));
    assert!(input.prompts().is_empty());
}

#[test]
fn test_missing_optional_tool_declined() {
    let sandbox = Sandbox::new();
    let probe = FakeProbe::with(&["node"]);
    let mut input = ScriptedInput::from_lines(&["maybe", ""]);

    let outcome = run(&checked(), &sandbox.settings(), &mut input, &probe).unwrap();

    assert_eq!(outcome, Outcome::Cancelled);
    assert_eq!(input.prompts(), &["Continue anyway? (y/N): ", "Continue anyway? (y/N): "]);
}

#[test]
fn test_missing_optional_tool_accepted() {
    let sandbox = Sandbox::new();
    let probe = FakeProbe::with(&["node"]);
    let mut input = ScriptedInput::from_lines(&["y"]);

    assert!(check_environment(&sandbox.settings(), &probe, &mut input).unwrap());
}

#[test]
fn test_all_tools_present_asks_nothing() {
    let sandbox = Sandbox::new();
    let probe = FakeProbe::with(&["node", "ffmpeg"]);
    let mut input = ScriptedInput::new(vec![]);

    assert!(check_environment(&sandbox.settings(), &probe, &mut input).unwrap());
    assert!(input.prompts().is_empty());
}

#[test]
fn test_skip_check_never_probes() {
    let sandbox = Sandbox::new();
    let probe = FakeProbe::with(&[]);
    let mut input = ScriptedInput::from_lines(&[""]);

    let outcome = run(&skip_check(), &sandbox.settings(), &mut input, &probe).unwrap();

    assert_eq!(outcome, Outcome::NoUrls);
}

#[test]
fn test_interrupted_collection_is_nothing_to_do() {
    let sandbox = Sandbox::new();
    let probe = FakeProbe::with(&["node", "ffmpeg"]);
    let mut input = ScriptedInput::new(vec![
        InputEvent::Line("https://b23.tv/abc".to_string()),
        InputEvent::Interrupted,
    ]);

    let outcome = run(&checked(), &sandbox.settings(), &mut input, &probe).unwrap();

    assert_eq!(outcome, Outcome::NoUrls);
}

#[test]
fn test_declined_download_moves_nothing() {
    let sandbox = Sandbox::new();
    sandbox.add_library_folder("anime");
    touch(&sandbox.work.join("old.mp3"), "");
    let probe = FakeProbe::with(&["node", "ffmpeg"]);
    let mut input = ScriptedInput::from_lines(&["https://b23.tv/abc", "", "2", "n"]);

    let outcome = run(&checked(), &sandbox.settings(), &mut input, &probe).unwrap();

    assert_eq!(outcome, Outcome::Cancelled);
    assert_eq!(file_names(&sandbox.work), vec!["old.mp3"]);
}

#[test]
fn test_launch_failure_is_an_error() {
    let sandbox = Sandbox::new();
    let mut settings = sandbox.settings();
    settings.downloader = DownloaderSettings {
        program: "bvdl-no-such-downloader".to_string(),
        base_args: vec![],
        url_flag: "--url".to_string(),
    };
    let probe = FakeProbe::with(&[]);
    let mut input = ScriptedInput::from_lines(&["https://b23.tv/abc", "", "1", "y"]);

    let err = run(&skip_check(), &settings, &mut input, &probe).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<BvdlError>(),
        Some(BvdlError::DownloadFailed(_))
    ));
}

/// Downloader stand-in: writes `song.mp3` into the working directory and
/// records the URL arguments it received.
#[cfg(unix)]
fn fake_downloader(exit_code: i32) -> DownloaderSettings {
    DownloaderSettings {
        program: "sh".to_string(),
        base_args: vec![
            "-c".to_string(),
            format!(
                "printf '%s\\n' \"$@\" > args.txt; echo new > song.mp3; exit {}",
                exit_code
            ),
            "bv2mp3".to_string(),
        ],
        url_flag: "--url".to_string(),
    }
}

#[cfg(unix)]
#[test]
fn test_full_run_moves_into_existing_folder_with_suffix() {
    let sandbox = Sandbox::new();
    let dest = sandbox.add_library_folder("anime");
    touch(&dest.join("song.mp3"), "original");

    let mut settings = sandbox.settings();
    settings.downloader = fake_downloader(0);
    let probe = FakeProbe::with(&["node", "ffmpeg"]);
    let mut input = ScriptedInput::from_lines(&[
        "见 https://www.bilibili.com/video/BV1xyz 真好",
        "https://b23.tv/abc",
        "",
        "2",
        "",
    ]);

    let outcome = run(&checked(), &settings, &mut input, &probe).unwrap();

    assert_eq!(
        outcome,
        Outcome::Downloaded {
            destination: Destination::Directory(settings.library_dir.join("anime")),
            moved: vec![MovedFile {
                original: "song.mp3".to_string(),
                final_name: "song_1.mp3".to_string(),
            }],
        }
    );
    assert_eq!(file_names(&dest), vec!["song.mp3", "song_1.mp3"]);
    assert_eq!(
        std::fs::read_to_string(sandbox.work.join("args.txt")).unwrap(),
        "--url=https://www.bilibili.com/video/BV1xyz\n--url=https://b23.tv/abc\n"
    );
}

#[cfg(unix)]
#[test]
fn test_full_run_current_directory_keeps_files() {
    let sandbox = Sandbox::new();
    sandbox.add_library_folder("anime");

    let mut settings = sandbox.settings();
    settings.downloader = fake_downloader(0);
    let probe = FakeProbe::with(&["node", "ffmpeg"]);
    let mut input = ScriptedInput::from_lines(&["https://b23.tv/abc", "", "1", "y"]);

    let outcome = run(&checked(), &settings, &mut input, &probe).unwrap();

    assert_eq!(
        outcome,
        Outcome::Downloaded {
            destination: Destination::CurrentDirectory,
            moved: vec![],
        }
    );
    assert!(sandbox.work.join("song.mp3").exists());
    assert!(file_names(&sandbox.library.join("anime")).is_empty());
}

#[cfg(unix)]
#[test]
fn test_download_failure_skips_relocation() {
    let sandbox = Sandbox::new();
    let dest = sandbox.add_library_folder("anime");

    let mut settings = sandbox.settings();
    settings.downloader = fake_downloader(2);
    let probe = FakeProbe::with(&["node", "ffmpeg"]);
    let mut input = ScriptedInput::from_lines(&["https://b23.tv/abc", "", "2", "y"]);

    let err = run(&checked(), &settings, &mut input, &probe).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<BvdlError>(),
        Some(BvdlError::DownloadFailed(_))
    ));
    assert!(file_names(&dest).is_empty());
    assert!(sandbox.work.join("song.mp3").exists());
}
