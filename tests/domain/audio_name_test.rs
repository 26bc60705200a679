use leadscribe::domain::derive_audio_filename;

#[test]
fn given_quoted_filename_when_deriving_then_prefixes_timestamp() {
    let name = derive_audio_filename(Some("attachment; filename=\"call.mp3\""), 1700000000);
    assert_eq!(name, "1700000000_call.mp3");
}

#[test]
fn given_extended_filename_when_deriving_then_prefers_it_over_quoted() {
    let header = "attachment; filename=\"fallback.mp3\"; filename*=utf-8''recording-42.mp3";
    let name = derive_audio_filename(Some(header), 1700000000);
    assert_eq!(name, "1700000000_recording-42.mp3");
}

#[test]
fn given_non_ascii_extended_filename_when_deriving_then_keeps_it() {
    let header = "attachment; filename*=utf-8''звонок.mp3";
    let name = derive_audio_filename(Some(header), 1700000000);
    assert_eq!(name, "1700000000_звонок.mp3");
}

#[test]
fn given_no_header_when_deriving_then_falls_back_to_unknown() {
    let name = derive_audio_filename(None, 1700000000);
    assert_eq!(name, "1700000000_unknown.mp3");
}

#[test]
fn given_header_without_filename_when_deriving_then_falls_back_to_unknown() {
    let name = derive_audio_filename(Some("attachment"), 1700000000);
    assert_eq!(name, "1700000000_unknown.mp3");
}

#[test]
fn given_forbidden_characters_when_deriving_then_replaces_with_underscores() {
    let header = "attachment; filename=\"a/b\\c*d?e:f<g>h|i;j.mp3\"";
    let name = derive_audio_filename(Some(header), 1700000000);
    assert_eq!(name, "1700000000_a_b_c_d_e_f_g_h_i_j.mp3");
}

#[test]
fn given_name_without_extension_when_deriving_then_appends_mp3() {
    let name = derive_audio_filename(Some("attachment; filename=\"voicemail\""), 1700000000);
    assert_eq!(name, "1700000000_voicemail.mp3");
}

#[test]
fn given_same_name_at_different_seconds_when_deriving_then_names_differ() {
    let header = Some("attachment; filename=\"call.mp3\"");
    let first = derive_audio_filename(header, 1700000000);
    let second = derive_audio_filename(header, 1700000001);
    assert_ne!(first, second);
}

#[test]
fn given_empty_quoted_filename_when_deriving_then_falls_back_to_unknown() {
    let name = derive_audio_filename(Some("attachment; filename=\"\""), 1700000000);
    assert_eq!(name, "1700000000_unknown.mp3");
}
