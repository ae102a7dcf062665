use exmark_converter::{convert_to_element, convert_to_markup, ConvertConfig};
use exmark_parser::parse;
use exmark_proto::virt::VNode;

fn convert(source: &str) -> String {
    let doc = parse(source).unwrap();
    convert_to_markup(&doc, &ConvertConfig::default())
}

#[test]
fn test_referenced_component_becomes_slotted_child() {
    let output = convert(
        r#"<div>
            <div class="ee-media"><div><div>src</div><div>photo.png</div></div></div>
            <div class="paywall-card"><div><div>media</div><div>→ ee-media-1</div></div></div>
        </div>"#,
    );

    assert_eq!(
        output,
        r#"<paywall-card><ee-media src="photo.png" slot="media"></ee-media></paywall-card>"#
    );
}

#[test]
fn test_children_label_attaches_without_slot() {
    let output = convert(
        r#"<div>
            <div class="ee-media"><div><div>src</div><div>photo.png</div></div></div>
            <div class="paywall-card"><div><div>children</div><div>→ ee-media-1</div></div></div>
        </div>"#,
    );

    assert_eq!(
        output,
        r#"<paywall-card><ee-media src="photo.png"></ee-media></paywall-card>"#
    );
}

#[test]
fn test_comma_separated_references_expand_in_order() {
    let output = convert(
        r#"<div>
            <div class="plan-col"><div><div>tier</div><div>basic</div></div></div>
            <div class="plan-col"><div><div>tier</div><div>pro</div></div></div>
            <div class="plan-grid"><div><div>columns</div><div>→ plan-col-1, → plan-col-2</div></div></div>
        </div>"#,
    );

    assert_eq!(
        output,
        r#"<plan-grid><plan-col tier="basic" slot="columns"></plan-col><plan-col tier="pro" slot="columns"></plan-col></plan-grid>"#
    );
}

#[test]
fn test_unresolved_reference_dropped_silently() {
    let output = convert(
        r#"<div>
            <div class="a-card"><div><div>x</div><div>ok</div></div></div>
            <div class="b-card"><div><div>media</div><div>→ ghost-9</div></div></div>
        </div>"#,
    );

    // the row is consumed; the token never leaks into the output
    assert!(!output.contains('→'));
    assert!(!output.contains("ghost"));
    assert!(output.starts_with("<b-card"));
}

#[test]
fn test_root_is_last_component_when_nothing_is_referenced() {
    let output = convert(
        r#"<div>
            <div class="a-card"><div><div>n</div><div>1</div></div></div>
            <div class="b-card"><div><div>n</div><div>2</div></div></div>
            <div class="c-card"><div><div>n</div><div>3</div></div></div>
        </div>"#,
    );

    assert_eq!(output, r#"<c-card n="3"></c-card>"#);
}

#[test]
fn test_reference_chain_converts_transitively() {
    let output = convert(
        r#"<div>
            <div class="x-leaf"><div><div>depth</div><div>2</div></div></div>
            <div class="x-branch"><div><div>children</div><div>→ x-leaf-1</div></div></div>
            <div class="x-root"><div><div>children</div><div>→ x-branch-1</div></div></div>
        </div>"#,
    );

    assert_eq!(
        output,
        r#"<x-root><x-branch><x-leaf depth="2"></x-leaf></x-branch></x-root>"#
    );
}

#[test]
fn test_reference_cycle_degrades_instead_of_recursing() {
    let doc = parse(
        r#"<div>
            <div class="a-card"><div><div>children</div><div>→ b-card-1</div></div></div>
            <div class="b-card"><div><div>children</div><div>→ a-card-1</div></div></div>
        </div>"#,
    )
    .unwrap();

    // must terminate; the repeated component comes back as an opaque copy
    let output = convert_to_markup(&doc, &ConvertConfig::default());
    assert!(output.starts_with("<b-card>"));
    assert!(output.contains(r#"class="b-card""#));
}

#[test]
fn test_same_name_components_number_in_document_order() {
    let doc = parse(
        r#"<div>
            <div class="plan-col"><div><div>tier</div><div>first</div></div></div>
            <div class="plan-col"><div><div>tier</div><div>second</div></div></div>
            <div class="plan-grid"><div><div>columns</div><div>→ plan-col-2</div></div></div>
        </div>"#,
    )
    .unwrap();

    let result = convert_to_element(&doc, &ConvertConfig::default());
    let VNode::Element(grid) = result.node() else {
        panic!("expected element root");
    };
    assert_eq!(grid.tag, "plan-grid");

    let VNode::Element(col) = &grid.children[0] else {
        panic!("expected element child");
    };
    assert_eq!(col.attributes[0], ("tier".to_string(), "second".to_string()));
}
