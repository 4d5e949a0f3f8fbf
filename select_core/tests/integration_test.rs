use futures_util::StreamExt;
use select_core::{
    config::I18nConfig, init_i18n, I18nService, SelectFiles, SelectedFile, SelectionConfig,
    StaticPickerHost, UploadPolicy, ValidationError, ValidationState,
};
use std::time::Duration;
use tempfile::TempDir;

const MB: u64 = 1024 * 1024;

fn setup_component(selection: Vec<SelectedFile>) -> (SelectFiles<StaticPickerHost<SelectedFile>>, StaticPickerHost<SelectedFile>, I18nService) {
    let i18n = I18nService::default();
    let host = StaticPickerHost::new(selection);
    let select = SelectFiles::new(host.clone(), &i18n);
    (select, host, i18n)
}

#[tokio::test]
async fn test_disallowed_type_is_rejected_with_message() {
    let (select, _host, i18n) = setup_component(Vec::new());

    let err = select
        .trigger_drop_files(
            &SelectionConfig::new(true, Some("image/*")),
            &UploadPolicy::default(),
            vec![SelectedFile::new("a.txt", 10, "text/plain")],
        )
        .into_files()
        .await
        .unwrap_err();

    assert!(matches!(err, ValidationError::DisallowedFileType { .. }));
    assert!(err.message().contains("a.txt"));
    assert!(err.message().contains("image/*"));
    assert_eq!(
        err.to_string(),
        i18n.get_i18n_text().not_allowed_file_type_msg("a.txt", "image/*")
    );
}

#[tokio::test]
async fn test_name_suffix_accepts_untyped_file() {
    let (select, _host, _i18n) = setup_component(Vec::new());

    let files = select
        .trigger_drop_files(
            &SelectionConfig::new(false, Some(".png")),
            &UploadPolicy::default(),
            vec![SelectedFile::new("pic.png", 10, "")],
        )
        .into_files()
        .await
        .unwrap();

    assert_eq!(files, vec![SelectedFile::new("pic.png", 10, "")]);
}

#[tokio::test]
async fn test_size_cap_boundary() {
    let (select, _host, _i18n) = setup_component(Vec::new());
    let options = SelectionConfig::default();
    let policy = UploadPolicy::with_maximum_size_mb(2.0);

    let at_cap = select
        .trigger_drop_files(&options, &policy, vec![SelectedFile::new("at-cap.bin", 2 * MB, "")])
        .into_files()
        .await;
    assert!(at_cap.is_ok());

    let over_cap = select
        .trigger_drop_files(&options, &policy, vec![SelectedFile::new("over.bin", 2 * MB + 1, "")])
        .into_files()
        .await
        .unwrap_err();

    match over_cap {
        ValidationError::FileTooLarge { file_size, maximum_size_mb, message } => {
            assert_eq!(file_size, 2 * MB + 1);
            assert_eq!(maximum_size_mb, 2.0);
            assert!(message.contains(&(2 * MB + 1).to_string()));
        }
        other => panic!("expected size rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unrestricted_drop_keeps_order() {
    let (select, _host, _i18n) = setup_component(Vec::new());
    let dropped = vec![
        SelectedFile::new("fileA.doc", 100, "application/msword"),
        SelectedFile::new("fileB", 5 * MB, ""),
    ];

    let files = select
        .trigger_drop_files(&SelectionConfig::default(), &UploadPolicy::default(), dropped.clone())
        .into_files()
        .await
        .unwrap();

    assert_eq!(files, dropped);
}

#[tokio::test]
async fn test_picker_and_drop_apply_identical_policies() {
    let selection = vec![
        SelectedFile::new("ok.png", MB, "image/png"),
        SelectedFile::new("big.png", 3 * MB, "image/png"),
    ];
    let (select, _host, _i18n) = setup_component(selection.clone());
    let options = SelectionConfig::new(true, Some("image/*"));
    let policy = UploadPolicy::with_maximum_size_mb(2.0);

    let picked: Vec<_> = select.trigger_select_files(&options, &policy).collect().await;
    let dropped: Vec<_> = select.trigger_drop_files(&options, &policy, selection).collect().await;

    assert_eq!(picked, dropped);
    assert_eq!(picked.len(), 2);
    assert!(picked[0].is_ok());
    assert!(matches!(picked[1], Err(ValidationError::FileTooLarge { .. })));
}

#[tokio::test]
async fn test_retriggering_never_stacks_controls() {
    let host = StaticPickerHost::<SelectedFile>::unresponsive();
    let i18n = I18nService::default();
    let select = SelectFiles::new(host.clone(), &i18n);
    let options = SelectionConfig::default();
    let policy = UploadPolicy::default();

    let mut first = select.trigger_select_files(&options, &policy);
    let mut second = select.trigger_select_files(&options, &policy);

    assert!(tokio::time::timeout(Duration::from_millis(10), first.next()).await.is_err());
    assert!(tokio::time::timeout(Duration::from_millis(10), second.next()).await.is_err());

    // the superseded selection resolves as an empty success
    assert!(first.next().await.is_none());
    assert_eq!(first.state(), ValidationState::Completed);

    assert_eq!(host.mounted_controls(), 1);
    assert_eq!(host.peak_mounted(), 1);

    drop(second);
    assert_eq!(host.mounted_controls(), 0);
}

#[tokio::test]
async fn test_language_switch_changes_rejection_text() {
    let (select, _host, i18n) = setup_component(Vec::new());
    let options = SelectionConfig::new(false, Some(".pdf"));
    let dropped = || vec![SelectedFile::new("notes.txt", 1, "text/plain")];

    let english = select
        .trigger_drop_files(&options, &UploadPolicy::default(), dropped())
        .into_files()
        .await
        .unwrap_err();

    i18n.set_language("zh-cn").unwrap();

    let chinese = select
        .trigger_drop_files(&options, &UploadPolicy::default(), dropped())
        .into_files()
        .await
        .unwrap_err();

    assert_ne!(english.message(), chinese.message());
    assert!(chinese.message().contains("notes.txt"));
}

#[tokio::test]
async fn test_local_files_through_custom_bundle() {
    let dir = TempDir::new().unwrap();
    let bundle = dir.path().join("de.json");
    std::fs::write(
        &bundle,
        r#"{"locale":"de-de","not_allowed_file_type":"Nicht erlaubt: {file_name}","beyond_maximal_file_size":"Zu groß: {file_size}"}"#,
    )
    .unwrap();

    let image = dir.path().join("photo.jpg");
    std::fs::write(&image, vec![0u8; 64]).unwrap();
    let script = dir.path().join("run.sh");
    std::fs::write(&script, b"#!/bin/sh\n").unwrap();

    let i18n = init_i18n(&I18nConfig {
        default_locale: "de-de".to_string(),
        bundle_files: vec![bundle],
    })
    .await
    .unwrap();
    assert_eq!(i18n.current_locale(), "de-de");

    let files = vec![
        SelectedFile::from_path(&image).await.unwrap(),
        SelectedFile::from_path(&script).await.unwrap(),
    ];
    assert_eq!(files[0].mime_type, "image/jpeg");

    let select = SelectFiles::new(StaticPickerHost::<SelectedFile>::new(Vec::new()), &i18n);
    let mut validation = select.trigger_drop_files(&SelectionConfig::new(true, Some("image/*")), &UploadPolicy::default(), files);

    assert_eq!(validation.next().await.unwrap().unwrap().name, "photo.jpg");
    let err = validation.next().await.unwrap().unwrap_err();
    assert_eq!(err.message(), "Nicht erlaubt: run.sh");
    assert!(validation.next().await.is_none());
}

#[tokio::test]
async fn test_unknown_default_locale_falls_back() {
    let i18n = init_i18n(&I18nConfig {
        default_locale: "xx-yy".to_string(),
        bundle_files: Vec::new(),
    })
    .await
    .unwrap();

    assert_eq!(i18n.current_locale(), "en-us");
}
