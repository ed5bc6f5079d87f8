//! Library integration tests.

use neuron_compat::{CompatError, CompilerKind};

#[test]
fn error_types_are_public() {
    let err = CompatError::UnrecognizedCompilerKind {
        kind: "bogus-cc".into(),
    };
    assert!(err.to_string().contains("bogus-cc"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> neuron_compat::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn compiler_kind_is_reexported() {
    let kind: CompilerKind = "neuronx-cc".parse().unwrap();
    assert_eq!(kind.display_name(), "NeuronX Compiler");
}

#[test]
fn unrecognized_kind_message() {
    let err = CompatError::UnrecognizedCompilerKind {
        kind: "bogus-cc".into(),
    };
    insta::assert_snapshot!(err.to_string(), @"Pretrained model compiler type bogus-cc not recognized.");
}

#[test]
fn not_installed_message() {
    let err = CompatError::not_installed(CompilerKind::NeuronCc);
    insta::assert_snapshot!(err.to_string(), @"Pretrained model was compiled for neuron-cc, but neuron-cc is not installed.");
}

#[test]
fn package_not_installed_message() {
    let err = CompatError::package_not_installed(CompilerKind::NeuronxCc);
    insta::assert_snapshot!(err.to_string(), @"NeuronX Compiler python package is not installed.");
}

#[test]
fn incompatible_version_message() {
    let err = CompatError::IncompatibleCompilerVersion {
        kind: "neuron-cc".into(),
        declared: "2.0.0".into(),
        installed: "1.2.0".into(),
    };
    insta::assert_snapshot!(err.to_string(), @"Pretrained model is compiled with neuron-cc(2.0.0) newer than current compiler (1.2.0), which may cause runtime incompatibilities.");
}
