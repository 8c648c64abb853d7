use karaokebox::app::config::{AppConfig, PersistentState};
use karaokebox::catalog::SongRepository;
use karaokebox::media::{HeadlessPlayer, MediaEvent};
use karaokebox::session::{
    Evaluator, FolderStatus, NoticeLevel, PlayerState, Scheduler, SearchOutcome, Session,
    SessionConfig, TimerFired, TimerKind,
};
use karaokebox::storage::LocalFs;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

const CATALOG: &str = "\
[101]\nArquivo= 101.mp4\nArtista= Tim Maia\nMusica= Azul da Cor do Mar\n***\n\
[102]\nArquivo= 102.mp4\nArtista= Cazuza\nMusica= Exagerado\n***\n\
[103]\nArquivo= 103.mp4\nArtista= Rita Lee\nMusica= Lanca Perfume\n***\n";

struct Rig {
    session: Session,
    timer_rx: mpsc::Receiver<TimerFired>,
    media_rx: mpsc::Receiver<MediaEvent>,
}

fn rig(folder: &Path) -> Rig {
    let (timer_tx, timer_rx) = mpsc::channel(16);
    let (media_tx, media_rx) = mpsc::channel(16);
    let repo = SongRepository::new(Arc::new(LocalFs), folder, "karaoke.txt");
    let config = SessionConfig {
        advance_delay: Duration::from_millis(30),
        skip_cooldown: Duration::from_millis(100),
        poll_interval: Duration::from_millis(40),
    };
    let session = Session::new(
        repo,
        Box::new(HeadlessPlayer::new(media_tx, Duration::from_millis(40))),
        Scheduler::new(timer_tx),
        Evaluator::seeded(99),
        config,
    );
    Rig {
        session,
        timer_rx,
        media_rx,
    }
}

/// Feed timer and media events into the session until `done` holds
async fn pump_until(rig: &mut Rig, done: impl Fn(&Session) -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while !done(&rig.session) {
        tokio::select! {
            Some(fired) = rig.timer_rx.recv() => rig.session.on_timer(fired),
            Some(event) = rig.media_rx.recv() => rig.session.on_media_event(event),
            _ = tokio::time::sleep_until(deadline) => panic!("session never reached the expected state"),
        }
    }
}

fn request(session: &mut Session, number: &str) {
    for c in number.chars() {
        session.push_digit(c);
    }
    assert!(matches!(session.submit_search(), SearchOutcome::Found(_)));
    session.confirm_pending();
}

#[tokio::test]
async fn test_full_evening() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("karaoke.txt"), CATALOG).unwrap();
    let mut rig = rig(dir.path());
    rig.session.reload_catalog();
    assert_eq!(rig.session.repository().len(), 3);

    request(&mut rig.session, "101");
    request(&mut rig.session, "0102");
    assert_eq!(rig.session.state(), PlayerState::Playing);
    assert_eq!(rig.session.queue().queue().len(), 1);

    // First song ends on its own, gets rated, second starts
    pump_until(&mut rig, |s| s.performance().is_some()).await;
    assert_eq!(rig.session.state(), PlayerState::Ended);
    pump_until(&mut rig, |s| s.current().map(|x| x.id) == Some(102)).await;
    assert_eq!(rig.session.state(), PlayerState::Playing);
    assert!(rig.session.performance().is_none());

    // Queue runs dry
    pump_until(&mut rig, |s| s.state() == PlayerState::Idle).await;
    assert!(rig.session.current().is_none());
    assert_eq!(rig.session.queue().previous().len(), 2);
}

#[tokio::test]
async fn test_skip_storm_advances_once() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("karaoke.txt"), CATALOG).unwrap();
    let mut rig = rig(dir.path());
    rig.session.reload_catalog();

    request(&mut rig.session, "101");
    request(&mut rig.session, "102");
    request(&mut rig.session, "103");

    let now = Instant::now();
    let accepted = (0..10)
        .filter(|i| rig.session.skip(now + Duration::from_millis(*i)))
        .count();
    assert_eq!(accepted, 1);

    pump_until(&mut rig, |s| s.current().map(|x| x.id) == Some(102)).await;
    assert_eq!(rig.session.queue().queue().len(), 1);
    assert_eq!(rig.session.queue().queue()[0].id, 103);
}

#[tokio::test]
async fn test_catalog_found_by_other_name() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Karaoke.TXT"), CATALOG).unwrap();
    let mut rig = rig(dir.path());
    rig.session.reload_catalog();
    assert_eq!(rig.session.folder_status(), FolderStatus::Ready);
    assert!(rig.session.repository().find_by_id(103).is_some());
}

#[tokio::test]
async fn test_folder_plugged_in_later() {
    let parent = tempfile::tempdir().unwrap();
    let folder = parent.path().join("usb");
    let mut rig = rig(&folder);

    rig.session.start();
    assert_eq!(rig.session.folder_status(), FolderStatus::Disconnected);
    assert!(rig.session.pending_timer(TimerKind::FolderPoll).is_some());

    fs::create_dir(&folder).unwrap();
    fs::write(folder.join("karaoke.txt"), CATALOG).unwrap();
    pump_until(&mut rig, |s| s.folder_status() == FolderStatus::Ready).await;
    assert_eq!(rig.session.repository().len(), 3);

    let notices = rig.session.take_notices();
    assert!(notices
        .iter()
        .any(|n| n.level == NoticeLevel::Info && n.message.contains("3 songs")));

    // Unplug again
    fs::remove_dir_all(&folder).unwrap();
    pump_until(&mut rig, |s| s.folder_status() == FolderStatus::Disconnected).await;
    assert!(rig.session.repository().is_empty());
    rig.session.shutdown();
    assert!(rig.session.pending_timer(TimerKind::FolderPoll).is_none());
}

#[tokio::test]
async fn test_set_folder_switches_catalog() {
    let a = tempfile::tempdir().unwrap();
    let b = tempfile::tempdir().unwrap();
    fs::write(a.path().join("karaoke.txt"), CATALOG).unwrap();
    fs::write(
        b.path().join("karaoke.txt"),
        "[7]\nArquivo= 7.mp4\nArtista= X\nMusica= Y\n***\n",
    )
    .unwrap();

    let mut rig = rig(a.path());
    rig.session.reload_catalog();
    rig.session.set_folder(b.path());
    assert_eq!(rig.session.repository().len(), 1);
    assert!(rig.session.repository().find_by_id(101).is_none());
}

#[test]
fn test_config_dir_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let state = PersistentState {
        karaoke_folder_path: "/srv/karaoke".to_string(),
        show_help_on_start: true,
    };
    state.save_to(&dir.path().join("state.toml")).unwrap();
    let (config, loaded) = AppConfig::load_from(dir.path());
    assert_eq!(loaded.karaoke_folder_path, "/srv/karaoke");
    assert_eq!(config.session_config().advance_delay, Duration::from_secs(3));
}
