use std::path::Path;

use newsmap::loader::DirectorySource;
use newsmap::session::{refresh_groups, switch_group, Effect, MapSession, UserAction};
use newsmap::view::compose;
use tokio::sync::Mutex;

fn demo_source() -> DirectorySource {
    DirectorySource::new(
        Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/data"),
        "groups.json",
    )
}

#[tokio::test]
async fn test_disaster_group_scene() {
    let source = demo_source();
    let session = Mutex::new(MapSession::new());
    refresh_groups(&session, &source).await;
    assert!(switch_group(&session, &source, "disaster-watch").await.unwrap());

    let mut session = session.lock().await;
    let scene = compose(&session);

    assert_eq!(scene.markers.len(), 5);
    assert_eq!(scene.regions.len(), 2);
    assert_eq!(scene.regions.style.map(|s| s.color), Some("#ef4444"));

    let names: Vec<&str> = scene.list.iter().map(|e| e.location_name.as_str()).collect();
    assert_eq!(names, vec!["Los Angeles", "Valencia", "Noto"]);
    assert_eq!(scene.list[0].duplicate_count, 2);
    assert_eq!(scene.list[0].items.len(), 3);

    // Second region is Valencia, which is the third record.
    let valencia = session.regions().feature(1).cloned().unwrap();
    let effect = session.handle(UserAction::ClickRegion(valencia));
    assert!(matches!(effect, Some(Effect::FlyTo(fly)) if fly.zoom == 5.0));
    assert_eq!(session.selection().selected(), Some(2));

    let scene = compose(&session);
    assert_eq!(scene.list.len(), 1);
    assert_eq!(scene.list[0].location_name, "Valencia");
}

#[tokio::test]
async fn test_switching_groups_resets_selection() {
    let source = demo_source();
    let session = Mutex::new(MapSession::new());
    refresh_groups(&session, &source).await;

    switch_group(&session, &source, "disaster-watch").await.unwrap();
    session.lock().await.handle(UserAction::SelectRecord(0));

    switch_group(&session, &source, "bts-chronicle").await.unwrap();
    let session = session.lock().await;
    assert_eq!(session.selection().selected(), None);

    let scene = compose(&session);
    let names: Vec<&str> = scene.list.iter().map(|e| e.location_name.as_str()).collect();
    assert_eq!(names, vec!["Los Angeles", "Seoul", "London"]);
    // Seoul's two records share coordinates; the first one encountered is the headline.
    assert_eq!(scene.list[1].duplicate_count, 1);
    assert_eq!(scene.list[1].headline.title, "Love Yourself: Speak Yourself finale");
    // Uncategorised records fall back to the group style.
    let london = scene.markers.iter().find(|m| m.name == "London").unwrap();
    assert_eq!(london.style.color, "#8b5cf6");
    assert!(scene.regions.is_empty());
}
