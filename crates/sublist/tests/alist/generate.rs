use serde_json::json;
use sublist::{playlist, Config, ExtInfStyle, Folder, Generator, PlaylistMode, Tag, Track};
use wiremock::{
    matchers::{body_partial_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

use super::{client, dir, file, AlistMock};

fn config(mode: PlaylistMode, folders: Vec<Folder>) -> Config {
    Config {
        mode,
        proxy: "https://proxy.example.com/?r={host}{path}".to_string(),
        folders,
    }
}

#[tokio::test]
async fn test_generate_proxy_playlists() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    server
        .mock_list("/music", json!([file("b.mp3"), dir("live"), file("a.mp3"), file("c.mp3")]))
        .await;
    server.mock_list("/empty", json!([dir("live")])).await;
    server.mock_list("/void", json!(null)).await;

    let config = config(
        PlaylistMode::Proxy,
        vec![
            Folder::new("Music", server.uri(), "/music"),
            Folder::new("Empty", server.uri(), "/empty"),
            Folder::new("Void", server.uri(), "/void"),
            Folder::new("Broken", server.uri(), "/broken"),
        ],
    );

    let output = tempfile::tempdir()?;
    let generator = Generator::from_config(client(), &config).output_dir(output.path());
    let (collection, written) = sublist::run(&config, &generator).await?;

    assert_eq!(collection.failures().count(), 1);
    assert_eq!(written, vec![output.path().join("Music.m3u")]);

    let mut files: Vec<_> = std::fs::read_dir(output.path())?
        .map(|e| e.map(|e| e.file_name()))
        .collect::<Result<_, _>>()?;
    files.sort();
    assert_eq!(files, vec!["Music.m3u"]);

    let content = std::fs::read_to_string(output.path().join("Music.m3u"))?;
    let host = server.uri();
    assert_eq!(
        content,
        format!(
            "#EXTM3U\n\
             #EXTINF:-1, group-title=\"Music\", c.mp3\nhttps://proxy.example.com/?r={host}/music/c.mp3\n\
             #EXTINF:-1, group-title=\"Music\", b.mp3\nhttps://proxy.example.com/?r={host}/music/b.mp3\n\
             #EXTINF:-1, group-title=\"Music\", a.mp3\nhttps://proxy.example.com/?r={host}/music/a.mp3\n"
        )
    );

    let parsed = playlist::parse(&content, ExtInfStyle::Comma);
    let names: Vec<_> = parsed.tracks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["c.mp3", "b.mp3", "a.mp3"]);
    assert!(parsed
        .tracks
        .iter()
        .all(|t| t.tags == vec![Tag::group_title("Music")]));

    Ok(())
}

#[tokio::test]
async fn test_generate_raw_playlist() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    let host = server.uri();
    server
        .mock_list(
            "/anime",
            json!([file("02.flac"), file("missing.flac"), file("01.flac")]),
        )
        .await;
    server
        .mock_get("/anime/01.flac", Some(&format!("{host}/d/anime/01.flac")))
        .await
        .mock_get("/anime/02.flac", Some(&format!("{host}/d/anime/02.flac")))
        .await
        .mock_get("/anime/missing.flac", None)
        .await;

    Mock::given(method("GET"))
        .and(path("/d/anime/01.flac"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("Location", "https://cdn.example.com/01.flac"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/d/anime/02.flac"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let config = config(
        PlaylistMode::Raw,
        vec![Folder::new("Anime OST", server.uri(), "/anime")],
    );
    let output = tempfile::tempdir()?;
    let generator = Generator::from_config(client(), &config).output_dir(output.path());
    let (_, written) = sublist::run(&config, &generator).await?;

    assert_eq!(written, vec![output.path().join("Anime OST.m3u")]);
    let content = std::fs::read_to_string(&written[0])?;
    assert_eq!(
        content,
        format!(
            "#EXTM3U\n\
             #EXTINF:-1 , 01.flac\nhttps://cdn.example.com/01.flac\n\
             #EXTINF:-1 , 02.flac\n{host}/d/anime/02.flac\n"
        )
    );

    assert_eq!(
        playlist::parse(&content, ExtInfStyle::Spaced).tracks,
        vec![
            Track::new("01.flac", "https://cdn.example.com/01.flac"),
            Track::new("02.flac", format!("{host}/d/anime/02.flac")),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_generate_overwrites_existing_playlist() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    server.mock_list("/music", json!([file("a.mp3")])).await;

    let output = tempfile::tempdir()?;
    let stale = "stale content that is longer than the new one\n".repeat(20);
    std::fs::write(output.path().join("Music.m3u"), stale)?;

    let config = config(
        PlaylistMode::Proxy,
        vec![Folder::new("Music", server.uri(), "/music")],
    );
    let generator = Generator::from_config(client(), &config).output_dir(output.path());
    sublist::run(&config, &generator).await?;

    let content = std::fs::read_to_string(output.path().join("Music.m3u"))?;
    assert!(content.starts_with("#EXTM3U\n#EXTINF:-1, group-title=\"Music\", a.mp3\n"));
    assert!(!content.contains("stale"));
    Ok(())
}

#[tokio::test]
async fn test_generate_escapes_group_title() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    server.mock_list("/q", json!([file("a.mp3")])).await;

    let name = r#"The "Quoted" Mix"#;
    let config = config(
        PlaylistMode::Proxy,
        vec![Folder::new(name, server.uri(), "/q")],
    );
    let output = tempfile::tempdir()?;
    let generator = Generator::from_config(client(), &config).output_dir(output.path());
    let (_, written) = sublist::run(&config, &generator).await?;

    let content = std::fs::read_to_string(&written[0])?;
    let parsed = playlist::parse(&content, ExtInfStyle::Comma);
    assert_eq!(parsed.tracks[0].tags, vec![Tag::group_title(name)]);
    Ok(())
}

#[tokio::test]
async fn test_generate_raw_playlist_of_locked_folder() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    let host = server.uri();
    Mock::given(method("POST"))
        .and(path("/api/fs/list"))
        .and(body_partial_json(json!({ "path": "/locked", "password": "pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": { "content": [file("a.mp3")] }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/fs/get"))
        .and(body_partial_json(json!({ "path": "/locked/a.mp3", "password": "pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": { "raw_url": format!("{host}/d/locked/a.mp3") }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/fs/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 403,
            "message": "password is incorrect or you have no permission",
            "data": null
        })))
        .with_priority(10)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/d/locked/a.mp3"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let config = config(
        PlaylistMode::Raw,
        vec![Folder::new("Locked", server.uri(), "/locked").with_password("pw")],
    );
    let output = tempfile::tempdir()?;
    let generator = Generator::from_config(client(), &config).output_dir(output.path());
    let (_, written) = sublist::run(&config, &generator).await?;

    assert_eq!(written.len(), 1);
    let content = std::fs::read_to_string(&written[0])?;
    assert_eq!(
        content,
        format!("#EXTM3U\n#EXTINF:-1 , a.mp3\n{host}/d/locked/a.mp3\n")
    );
    Ok(())
}
