//! Descriptors survive encode -> properties text -> decode.

#![cfg(unix)]

use chrono::Utc;
use promote_descriptor::{
    decode, encode, parse_properties, to_properties_string, ArtifactDescriptor, BasePath,
};
use proptest::prelude::*;

fn descriptor_strategy() -> impl Strategy<Value = ArtifactDescriptor> {
    let group = proptest::string::string_regex("[a-z]{1,6}(\\.[a-z]{1,6}){0,2}")
        .unwrap_or_else(|e| panic!("regex failed: {e}"));
    let artifact = proptest::string::string_regex("[a-z][a-z0-9-]{0,10}")
        .unwrap_or_else(|e| panic!("regex failed: {e}"));
    let version = prop_oneof![
        Just("1.0".to_string()),
        Just("2.4.1-SNAPSHOT".to_string()),
        Just("3.0-20240215.081500-12".to_string()),
    ];
    let artifact_type = prop_oneof![Just("jar"), Just("pom"), Just("war"), Just("")];
    let classifier = proptest::option::of("\\PC{1,12}");
    let scope = proptest::option::of(prop_oneof![Just("compile"), Just("test"), Just("")]);
    let file = proptest::option::of(
        proptest::string::string_regex("[a-z]{1,5}(/[a-z0-9 _-]{1,8}){0,2}/[a-z]{1,6}\\.jar")
            .unwrap_or_else(|e| panic!("regex failed: {e}")),
    );

    (group, artifact, version, artifact_type, classifier, scope, file).prop_map(
        |(group, artifact, version, artifact_type, classifier, scope, file)| {
            let mut d = ArtifactDescriptor::new(group, artifact, version, artifact_type);
            d.classifier = classifier;
            d.scope = scope.map(str::to_string);
            d.file = file.map(|rel| format!("/build/target/{rel}").into());
            d
        },
    )
}

proptest! {
    #[test]
    fn descriptor_round_trips_through_properties_text(
        original in descriptor_strategy(),
        prefix in prop_oneof![Just(""), Just("artifact"), Just("attached.3"), Just("x.")],
    ) {
        let base = BasePath::new("/build/target");
        let encoded = encode(&original, Some(prefix), Some(&base));
        let text = to_properties_string(&encoded, Some("round trip"), Utc::now());
        let parsed = parse_properties(&text).unwrap();
        prop_assert_eq!(&parsed, &encoded);

        let decoded = decode(&parsed, Some(prefix), Some(&base)).unwrap();
        prop_assert_eq!(&decoded.group_id, &original.group_id);
        prop_assert_eq!(&decoded.artifact_id, &original.artifact_id);
        prop_assert_eq!(&decoded.version, &original.version);
        prop_assert_eq!(&decoded.base_version, &original.base_version);
        prop_assert_eq!(&decoded.artifact_type, &original.artifact_type);
        prop_assert_eq!(&decoded.classifier, &original.classifier);
        prop_assert_eq!(&decoded.scope, &original.scope);
        prop_assert_eq!(&decoded.file, &original.file);
        prop_assert_eq!(decoded.id(), original.id());
    }
}
