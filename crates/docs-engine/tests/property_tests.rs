use docs_engine::Finalizer;
use docs_meta::{DataStreamInfo, PackageContext, PackageManifest, PolicyTemplate};
use proptest::prelude::*;

fn document_line() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("# Some title".to_string()),
        Just("## Reference".to_string()),
        Just("## Overview".to_string()),
        Just("## How do I deploy this integration?".to_string()),
        Just("### Agent-based deployment".to_string()),
        Just("### Agentless deployment".to_string()),
        Just("### audit".to_string()),
        Just("{{event \"audit\"}}".to_string()),
        Just("{{fields \"log\"}}".to_string()),
        Just("> **Note**: This documentation was generated using AI and should be reviewed for accuracy.".to_string()),
        Just(String::new()),
        "[A-Za-z .]{1,20}",
    ]
}

fn context() -> impl Strategy<Value = PackageContext> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(has_manifest, agentless, audit_event, log_event)| {
            let mut manifest = PackageManifest {
                name: "vault".into(),
                title: "Vault".into(),
                ..Default::default()
            };
            if agentless {
                manifest.policy_templates.push(PolicyTemplate {
                    name: "vault".into(),
                    deployment_modes: Some(docs_meta::DeploymentModes {
                        default: None,
                        agentless: Some(docs_meta::DeploymentModeConfig { enabled: true }),
                    }),
                });
            }
            PackageContext {
                manifest: has_manifest.then_some(manifest),
                data_streams: vec![
                    DataStreamInfo::new("audit", audit_event),
                    DataStreamInfo::new("log", log_event),
                ],
            }
        },
    )
}

proptest! {
    #[test]
    fn test_finalize_never_panics(s in "\\PC*", ctx in context()) {
        let _ = Finalizer::default().finalize(&s, &ctx);
    }

    #[test]
    fn test_finalize_idempotent(lines in prop::collection::vec(document_line(), 0..30), ctx in context()) {
        let finalizer = Finalizer::default();
        let text = lines.join("\n");

        let once = finalizer.finalize(&text, &ctx);
        let twice = finalizer.finalize(&once.content, &ctx);

        prop_assert_eq!(&twice.content, &once.content);
        prop_assert!(twice.report.is_unchanged());
    }
}
