use cif_core::{parse, Version};
use rstest::rstest;

#[test]
fn simple_document_has_one_block_with_expected_item_kinds() {
    let text = "data_simple\n_cell_length_a 10.0\n_title 'Simple Test Structure'\n_temperature_kelvin ?\n_pressure .";
    let doc = parse(text).unwrap();
    assert_eq!(doc.len(), 1);

    let block = doc.first_block().unwrap();
    assert_eq!(block.name(), "simple");

    let length = block.get_item("_cell_length_a").unwrap();
    assert!(length.is_numeric());
    assert_eq!(length.numeric_value(), Some(10.0));
    assert_eq!(length.span.end_col - length.span.start_col, 4);

    assert_eq!(
        block.get_item("_title").unwrap().text_value(),
        Some("Simple Test Structure")
    );
    assert!(block.get_item("_temperature_kelvin").unwrap().is_unknown());
    assert!(block.get_item("_pressure").unwrap().is_not_applicable());
}

#[rstest]
#[case("10.01(11)", 10.01, 0.11)]
#[case("11.910400(4)", 11.9104, 0.000004)]
#[case("90.000000(0)", 90.0, 0.0)]
fn uncertainty_notation_parses_per_reference_examples(
    #[case] literal: &str,
    #[case] expected_value: f64,
    #[case] expected_uncertainty: f64,
) {
    let text = format!("data_x\n_a {}\n", literal);
    let doc = parse(&text).unwrap();
    let value = doc.first_block().unwrap().get_item("_a").unwrap();
    assert!(value.is_numeric_with_uncertainty());
    assert_eq!(value.numeric_value(), Some(expected_value));
    assert_eq!(value.uncertainty_value(), Some(expected_uncertainty));
}

#[test]
fn two_loops_in_one_block_are_independently_indexed() {
    let text = "data_structure\n\
         loop_\n\
         _atom_site_label\n\
         _atom_site_type_symbol\n\
         _atom_site_fract_x\n\
         _atom_site_fract_y\n\
         _atom_site_fract_z\n\
         _atom_site_occupancy\n\
         C1 C 0.123 0.456 0.789 1.0\n\
         C2 C 0.111 0.222 0.333 1.0\n\
         N1 N 0.234 0.567 0.890 1.0\n\
         O1 O 0.345 0.678 0.901 1.0\n\
         O2 O 0.456 0.789 0.012 0.5\n\
         \n\
         loop_\n\
         _bond_atom_1\n\
         _bond_length\n\
         C1 1.54\n\
         C2 1.42\n\
         N1 1.33\n";
    let doc = parse(text).unwrap();
    let block = doc.first_block().unwrap();
    assert_eq!(block.loops().len(), 2);

    let atoms = block.get_loop(0).unwrap();
    assert_eq!(atoms.len(), 5);
    assert_eq!(
        atoms.get_by_tag(0, "_atom_site_label").unwrap().text_value(),
        Some("C1")
    );

    let bonds = block.get_loop(1).unwrap();
    assert_eq!(
        bonds.get_by_tag(0, "_bond_length").unwrap().numeric_value(),
        Some(1.54)
    );
}

#[test]
fn cif2_nested_list_and_table_values_parse_and_set_version() {
    let text = "#\\#CIF_2.0\ndata_x\n_nested_list [[1 2][3 4]]\n_coordinates {x:1.5 y:2.5 z:3.5}\n";
    let doc = parse(text).unwrap();
    assert_eq!(doc.version, Version::Cif2_0);

    let block = doc.first_block().unwrap();
    let outer = block.get_item("_nested_list").unwrap().list_value().unwrap();
    assert_eq!(outer.len(), 2);
    assert_eq!(outer[0].list_value().unwrap()[0].numeric_value(), Some(1.0));

    let table = block.get_item("_coordinates").unwrap().table_value().unwrap();
    assert_eq!(table.get("x").unwrap().numeric_value(), Some(1.5));
    assert_eq!(table.get("y").unwrap().numeric_value(), Some(2.5));
    assert_eq!(table.get("z").unwrap().numeric_value(), Some(3.5));
}

#[test]
fn multiple_data_blocks_are_indexed_by_position_and_name() {
    let text = "data_alpha\n_a 1\ndata_beta\n_b 2\n";
    let doc = parse(text).unwrap();
    assert_eq!(doc.len(), 2);
    assert_eq!(doc.get_block(0).unwrap().name(), "alpha");
    assert!(doc.get_block_by_name("BETA").is_some());
}
