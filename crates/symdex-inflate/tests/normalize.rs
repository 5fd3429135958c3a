//! End-to-end normalization against in-memory and on-disk corpora.

use serde_json::{Value, json};
use symdex_core::{Stub, Symbol, SymbolKind};
use symdex_inflate::{
    Corpus, InflateError, InflateRules, MemoryStore, Normalizer, RawSource, SymbolStore,
    UnavailableSet,
};
use tempfile::TempDir;

const PREFIX: &str = "doc://com.apple.documentation/documentation/";

fn stub(name: &str, path: &str, kind: SymbolKind) -> Stub {
    Stub {
        name: name.into(),
        path: path.into(),
        kind,
    }
}

fn method_doc(declarations: Value) -> Value {
    json!({
        "abstract": [{"type": "text", "text": "Does a thing."}],
        "metadata": {"roleHeading": "Instance Method"},
        "primaryContentSections": [
            {"kind": "declarations", "declarations": declarations}
        ]
    })
}

fn normalize(store: &MemoryStore, s: Stub) -> Result<Symbol, InflateError> {
    let rules = InflateRules::default();
    let unavailable = UnavailableSet::default();
    Normalizer::new(&rules, &unavailable, store).normalize(s, store)
}

#[test]
fn method_with_single_declaration() {
    let store = MemoryStore::new().with_raw(
        "framework/cls/foo",
        method_doc(json!([{
            "languages": ["occ"],
            "platforms": ["macOS"],
            "tokens": [{"kind": "text", "text": "- (void)foo;"}]
        }])),
    );
    let sym = normalize(&store, stub("foo", "framework/cls/foo", SymbolKind::Method)).unwrap();
    assert_eq!(sym.description, "Does a thing.");
    assert_eq!(sym.r#type, "Instance Method");
    assert_eq!(sym.declaration, "- (void)foo;");
    assert!(sym.declarations.is_empty());
    assert!(!sym.deprecated);
}

#[test]
fn identical_platform_declarations_collapse() {
    let store = MemoryStore::new().with_raw(
        "framework/cls/foo",
        method_doc(json!([
            {"languages": ["occ"], "platforms": ["macOS"], "tokens": [{"text": "- (void)foo;"}]},
            {"languages": ["occ"], "platforms": ["iOS", "tvOS"], "tokens": [{"text": "- (void)foo;"}]}
        ])),
    );
    let sym = normalize(&store, stub("foo", "framework/cls/foo", SymbolKind::Method)).unwrap();
    assert_eq!(sym.declaration, "- (void)foo;");
    assert!(sym.declarations.is_empty());
}

#[test]
fn distinct_platform_declarations_kept() {
    let store = MemoryStore::new().with_raw(
        "framework/cls/foo",
        method_doc(json!([
            {"languages": ["occ"], "platforms": ["macOS"], "tokens": [{"text": "- (void)foo:(NSInteger)x;"}]},
            {"languages": ["occ"], "platforms": ["iOS"], "tokens": [{"text": "- (void)foo:(int)x;"}]}
        ])),
    );
    let sym = normalize(&store, stub("foo", "framework/cls/foo", SymbolKind::Method)).unwrap();
    assert!(sym.declaration.is_empty());
    assert_eq!(sym.declarations.len(), 2);
    assert_eq!(sym.declarations["macos"], "- (void)foo:(NSInteger)x;");
    assert_eq!(sym.declarations["ios"], "- (void)foo:(int)x;");
}

#[test]
fn missing_declaration_fails_with_path() {
    let store = MemoryStore::new().with_raw("framework/cls/foo", method_doc(json!([])));
    let err = normalize(&store, stub("foo", "framework/cls/foo", SymbolKind::Method)).unwrap_err();
    assert_eq!(err.to_string(), "failed to inflate framework/cls/foo");
    let InflateError::Symbol { source, .. } = err else {
        panic!("expected a Symbol error");
    };
    assert!(matches!(*source, InflateError::MissingDeclaration { .. }));
}

#[test]
fn kernel_symbol_without_declaration_passes() {
    let store = MemoryStore::new().with_raw("kernel/osobject/foo", method_doc(json!([])));
    let sym = normalize(&store, stub("foo", "kernel/osobject/foo", SymbolKind::Method)).unwrap();
    assert!(!sym.has_declaration());
}

#[test]
fn unknown_content_kind_fails() {
    let store = MemoryStore::new().with_raw(
        "framework/cls",
        json!({"abstract": [{"type": "aside", "content": []}]}),
    );
    let err = normalize(&store, stub("Cls", "framework/cls", SymbolKind::Class)).unwrap_err();
    let InflateError::Symbol { path, source } = err else {
        panic!("expected a Symbol error");
    };
    assert_eq!(path, "framework/cls");
    assert!(matches!(*source, InflateError::UnknownContentKind(ref k) if k == "aside"));
}

#[test]
fn reference_resolution() {
    let doc = json!({
        "abstract": [
            {"type": "text", "text": "See "},
            {"type": "reference", "identifier": format!("{PREFIX}framework/cls/1234-bar")}
        ]
    });
    let store = MemoryStore::new()
        .with_raw("framework/cls/foo", doc.clone())
        .with_stub(stub("Bar", "framework/cls/bar", SymbolKind::Method));
    let sym = normalize(&store, stub("foo", "framework/cls/foo", SymbolKind::Method)).unwrap();
    assert_eq!(sym.description, "See Bar");

    let store = MemoryStore::new().with_raw("framework/cls/foo", doc);
    let sym = normalize(&store, stub("foo", "framework/cls/foo", SymbolKind::Method)).unwrap();
    assert_eq!(sym.description, "See [framework/cls/bar]");
}

#[test]
fn full_document() {
    let doc = json!({
        "identifier": {"interfaceLanguage": "occ", "url": "doc://com.apple.documentation/documentation/appkit/nsview/1483329-addsubview"},
        "abstract": [
            {"type": "text", "text": "Adds a view to the view’s subviews so it’s displayed above its siblings."}
        ],
        "metadata": {
            "role": "symbol",
            "roleHeading": "Instance Method",
            "title": "addSubview:",
            "modules": [{"name": "AppKit"}],
            "parent": {"title": "NSView"},
            "platforms": [
                {"name": "macOS", "introducedAt": "10.0", "current": "14.4", "beta": false}
            ]
        },
        "primaryContentSections": [
            {"kind": "declarations", "declarations": [{
                "languages": ["occ"],
                "platforms": ["macOS"],
                "tokens": [
                    {"kind": "text", "text": "- ("},
                    {"kind": "keyword", "text": "void"},
                    {"kind": "text", "text": ") "},
                    {"kind": "identifier", "text": "addSubview:"},
                    {"kind": "text", "text": "("},
                    {"kind": "typeIdentifier", "text": "NSView", "identifier": "doc://com.apple.documentation/documentation/appkit/nsview"},
                    {"kind": "text", "text": " *) "},
                    {"kind": "internalParam", "text": "view"},
                    {"kind": "text", "text": ";"}
                ]
            }]},
            {"kind": "parameters", "parameters": [
                {"name": "view", "content": [{"type": "paragraph", "inlineContent": [
                    {"type": "text", "text": "The view to add to the view as a subview."}
                ]}]}
            ]},
            {"kind": "content", "content": [
                {"type": "heading", "anchor": "discussion", "level": 2, "text": "Discussion"},
                {"type": "paragraph", "inlineContent": [
                    {"type": "text", "text": "This method establishes a strong reference to "},
                    {"type": "codeVoice", "code": "view"}
                ]}
            ]}
        ]
    });
    let store = MemoryStore::new()
        .with_raw("appkit/nsview/addsubview", doc)
        .with_stub(stub("NSView", "appkit/nsview", SymbolKind::Class));
    let sym = normalize(
        &store,
        stub("addSubview:", "appkit/nsview/addsubview", SymbolKind::Method),
    )
    .unwrap();

    insta::assert_json_snapshot!(sym, @r#"
    {
      "Name": "addSubview:",
      "Path": "appkit/nsview/addsubview",
      "Kind": "Method",
      "Description": "Adds a view to the view’s subviews so it’s displayed above its siblings.",
      "Type": "Instance Method",
      "Parent": "NSView",
      "Modules": [
        "AppKit"
      ],
      "Platforms": [
        {
          "Name": "macOS",
          "IntroducedAt": "10.0",
          "Current": "14.4",
          "Beta": false,
          "Deprecated": false,
          "DeprecatedAt": ""
        }
      ],
      "Deprecated": false,
      "Declaration": "- (void) addSubview:(NSView *) view;",
      "Parameters": [
        {
          "Name": "view",
          "Description": "The view to add to the view as a subview."
        }
      ],
      "Return": "",
      "InheritsFrom": ""
    }
    "#);
}

#[test]
fn renormalizing_a_record_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let symbols = dir.path().join("symbols");
    let raw = dir.path().join("cache/meta");
    std::fs::create_dir_all(symbols.join("fw")).unwrap();
    std::fs::create_dir_all(raw.join("fw")).unwrap();
    std::fs::write(
        symbols.join("fw/kmax.json"),
        r#"{"Name":"kMax = 10","Path":"fw/kmax","Kind":"Constant"}"#,
    )
    .unwrap();
    std::fs::write(
        raw.join("fw/kmax.json"),
        json!({
            "abstract": [{"type": "text", "text": "The maximum."}],
            "metadata": {"roleHeading": "Global Variable"},
            "primaryContentSections": [{"kind": "declarations", "declarations": [
                {"languages": ["occ"], "platforms": ["macOS"], "tokens": [{"text": "extern const int kMax;"}]}
            ]}]
        })
        .to_string(),
    )
    .unwrap();

    let corpus = Corpus::new(&symbols, &raw);
    let rules = InflateRules::default();
    let unavailable = UnavailableSet::default();
    let normalizer = Normalizer::new(&rules, &unavailable, &corpus);

    let first = normalizer
        .normalize(corpus.load_stub("fw/kmax").unwrap(), &corpus)
        .unwrap();
    assert_eq!(first.name, "kMax");
    corpus.write_record(&first).unwrap();

    let second = normalizer
        .normalize(corpus.load_stub("fw/kmax").unwrap(), &corpus)
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(corpus.get("fw/kmax").unwrap().name, "kMax");
    assert!(corpus.raw("fw/kmax").is_ok());
}
