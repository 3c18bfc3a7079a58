//! Edge case tests for diagram generation
//!
//! Tests for boundary conditions, unusual inputs, and error handling.

// =============================================================================
// Empty Input Tests
// =============================================================================

mod empty_inputs {
    use yumlgen::prelude::*;
    use yumlgen::generate;

    #[test]
    fn test_empty_catalog() {
        let yuml = generate(Vec::new(), GeneratorConfig::default()).unwrap();
        assert!(yuml.is_empty());
    }

    #[test]
    fn test_empty_catalog_explicit_mode() {
        let config = GeneratorConfig::default().with_interface_mode(InterfaceMode::Explicit);
        assert!(generate(Vec::new(), config).unwrap().is_empty());
    }

    #[test]
    fn test_interfaces_only_inline_mode() {
        let types = vec![
            TypeDescriptor::interface("IShiny"),
            TypeDescriptor::interface("INotch"),
        ];
        assert!(generate(types, GeneratorConfig::default()).unwrap().is_empty());
    }

    #[test]
    fn test_empty_declaration_source() {
        let provider = DeclarationProvider::new("   \n\n  \t  \n");
        assert!(provider.parse().unwrap().is_empty());
        assert!(Generator::default().generate_from(&provider).unwrap().is_empty());
    }

    #[test]
    fn test_empty_json_array() {
        let provider = JsonProvider::new("[]");
        assert!(provider.parse().unwrap().is_empty());
    }
}

// =============================================================================
// Member Shape Tests
// =============================================================================

mod member_shapes {
    use yumlgen::prelude::*;
    use yumlgen::{entries, generate};

    fn owner(shape: TypeShape) -> TypeDescriptor {
        TypeDescriptor::class("Owner").with_member(MemberDescriptor::new("value", shape))
    }

    #[test]
    fn test_iterable_without_element_or_arguments_is_skipped() {
        let shape = TypeShape::Container {
            container: "ArrayList".to_string(),
            element: None,
            type_arguments: Vec::new(),
            iterable: true,
        };
        let yuml = generate(
            vec![owner(shape), TypeDescriptor::class("ArrayList")],
            GeneratorConfig::default(),
        );
        // The container is itself in the catalog, so it is referenced directly.
        assert_eq!(
            entries(&yuml.unwrap()),
            entries("[Owner],[Owner]->[ArrayList],[ArrayList]")
        );

        let shape = TypeShape::Container {
            container: "ArrayList".to_string(),
            element: None,
            type_arguments: Vec::new(),
            iterable: true,
        };
        let yuml = generate(vec![owner(shape)], GeneratorConfig::default()).unwrap();
        assert_eq!(yuml, "[Owner]");
    }

    #[test]
    fn test_iterable_falls_back_to_first_argument() {
        let shape = TypeShape::Container {
            container: "Bag".to_string(),
            element: None,
            type_arguments: vec!["Item".to_string()],
            iterable: true,
        };
        let yuml = generate(
            vec![owner(shape), TypeDescriptor::class("Item")],
            GeneratorConfig::default(),
        )
        .unwrap();
        assert_eq!(entries(&yuml), entries("[Owner],[Owner]1-0..*[Item],[Item]"));
    }

    #[test]
    fn test_wrapper_with_zero_arguments_is_skipped() {
        let shape = TypeShape::wrapper("Lazy", Vec::<String>::new());
        let yuml = generate(vec![owner(shape)], GeneratorConfig::default()).unwrap();
        assert_eq!(yuml, "[Owner]");
    }

    #[test]
    fn test_wrapper_references_each_catalog_argument() {
        let shape = TypeShape::wrapper("Pair", ["Left", "Right", "String"]);
        let yuml = generate(
            vec![
                owner(shape),
                TypeDescriptor::class("Left"),
                TypeDescriptor::class("Right"),
            ],
            GeneratorConfig::default(),
        )
        .unwrap();
        assert_eq!(
            entries(&yuml),
            entries("[Owner],[Owner]->[Left],[Owner]->[Right],[Left],[Right]")
        );
    }

    #[test]
    fn test_array_of_catalog_type_is_many() {
        let yuml = generate(
            vec![owner(TypeShape::array("Wing")), TypeDescriptor::class("Wing")],
            GeneratorConfig::default(),
        )
        .unwrap();
        assert_eq!(entries(&yuml), entries("[Owner],[Owner]1-0..*[Wing],[Wing]"));
    }

    #[test]
    fn test_collection_of_unknown_type_is_ignored() {
        let yuml = generate(
            vec![owner(TypeShape::collection("List", "String"))],
            GeneratorConfig::default(),
        )
        .unwrap();
        assert_eq!(yuml, "[Owner]");
    }

    #[test]
    fn test_self_association_is_kept() {
        let node = TypeDescriptor::class("Node")
            .with_member(MemberDescriptor::new("next", TypeShape::single("Node")));
        let yuml = generate(vec![node], GeneratorConfig::default()).unwrap();
        assert_eq!(entries(&yuml), entries("[Node],[Node]->[Node]"));
    }

    #[test]
    fn test_interface_members_are_not_scanned() {
        let shiny = TypeDescriptor::interface("IShiny")
            .with_member(MemberDescriptor::new("key", TypeShape::single("Key")));
        let config = GeneratorConfig::default().with_interface_mode(InterfaceMode::Explicit);
        let yuml = generate(vec![shiny, TypeDescriptor::class("Key")], config).unwrap();
        assert_eq!(entries(&yuml), entries("[<<IShiny>>],[Key]"));
    }
}

// =============================================================================
// Catalog and Association Tests
// =============================================================================

mod merging {
    use yumlgen::graph::{AssociationCandidate, AssociationEdge};
    use yumlgen::prelude::*;

    #[test]
    fn test_duplicate_descriptor_keeps_first() {
        let mut catalog = TypeCatalog::new();
        assert!(catalog.add(TypeDescriptor::class("Shape")));
        assert!(!catalog.add(TypeDescriptor::interface("Shape")));
        assert_eq!(catalog.len(), 1);
        assert!(!catalog.is_interface("Shape"));
    }

    #[test]
    fn test_reverse_observation_merges_into_one_edge() {
        let mut index = AssociationIndex::new();
        index
            .observe(&AssociationCandidate::new("A", "B", Multiplicity::Many))
            .unwrap();
        index
            .observe(&AssociationCandidate::new("B", "A", Multiplicity::One))
            .unwrap();

        assert_eq!(index.len(), 1);
        let edge = index.get("B", "A").unwrap();
        assert_eq!(edge.first, "A");
        assert!(edge.is_bidirectional());
        assert_eq!(edge.first_multiplicity, Multiplicity::One);
        assert_eq!(edge.second_multiplicity, Multiplicity::Many);
    }

    #[test]
    fn test_unrelated_pair_is_an_invariant_violation() {
        let mut index = AssociationIndex::new();
        index
            .observe(&AssociationCandidate::new("A", "B", Multiplicity::One))
            .unwrap();
        let mut edge: AssociationEdge = index.edges()[0].clone();

        let err = edge
            .observe(&AssociationCandidate::new("A", "C", Multiplicity::One))
            .unwrap_err();
        assert!(matches!(err, DiagramError::InvariantViolation { .. }));
        assert!(err.to_string().contains("A -> C"));
    }

    #[test]
    fn test_edge_lookup_is_order_independent() {
        let mut index = AssociationIndex::new();
        index
            .observe(&AssociationCandidate::new("Lock", "Key", Multiplicity::One))
            .unwrap();
        assert!(index.get("Lock", "Key").is_some());
        assert!(index.get("Key", "Lock").is_some());
        assert!(index.get("Lock", "Secret").is_none());
    }
}

// =============================================================================
// Declaration Source Tests
// =============================================================================

mod declarations {
    use yumlgen::prelude::*;

    #[test]
    fn test_comments_and_blank_lines() {
        let provider = DeclarationProvider::new(
            "// birds\n\nclass Bird\n\n// nothing else\nclass Eagle extends Bird\n",
        );
        let types = provider.parse().unwrap();
        assert_eq!(types.len(), 2);
        assert_eq!(types[1].base.as_deref(), Some("Bird"));
    }

    #[test]
    fn test_unterminated_body_is_a_parse_error() {
        let provider = DeclarationProvider::new("class Lock {\n  key: Key\n");
        let err = provider.parse().unwrap_err();
        assert!(matches!(err, DiagramError::ParseError { .. }));
    }

    #[test]
    fn test_missing_json_file() {
        let result = JsonProvider::from_file("/nonexistent/yumlgen/types.json");
        assert!(matches!(result, Err(DiagramError::IoError { .. })));
    }
}
