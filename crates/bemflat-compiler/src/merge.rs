use bemflat_syntax::{NodeId, NodeKind, Rule, Stylesheet};

/// Move `incoming` nodes into `target`.
///
/// A declaration whose property `target` already declares overwrites that
/// declaration's value where it stands. Every other node (new properties,
/// comments, nested rules) is appended. Batches apply in order, so the last
/// source to set a property wins.
pub fn merge_declarations(sheet: &mut Stylesheet, target: NodeId, incoming: &[NodeId]) {
    for &node in incoming {
        if let Some(declaration) = sheet.as_declaration(node) {
            let (prop, value) = (declaration.prop.clone(), declaration.value.clone());
            let existing = sheet
                .children(target)
                .iter()
                .copied()
                .find(|&child| sheet.as_declaration(child).is_some_and(|d| d.prop == prop));
            if let Some(existing) = existing.and_then(|id| sheet.as_declaration_mut(id)) {
                existing.value = value;
                sheet.remove(node);
                continue;
            }
        }
        sheet.append_child(target, node);
    }
}

/// Turn an at-rule into a detached qualified rule with `selector`.
///
/// The rule takes over the at-rule's children and formatting, and always
/// ends its last declaration with a semicolon.
pub fn convert_at_rule(sheet: &mut Stylesheet, at_rule: NodeId, selector: String) -> NodeId {
    let (mut raws, source) = sheet
        .get(at_rule)
        .map(|node| (node.raws.clone(), node.source))
        .unwrap_or_default();
    raws.semicolon = true;

    let rule = sheet.alloc_with_source(NodeKind::Rule(Rule { selector }), raws, source);
    sheet.move_children(at_rule, rule);
    rule
}

#[cfg(test)]
mod tests {
    use bemflat_syntax::parse_stylesheet;

    use super::*;

    #[test]
    fn test_convert_keeps_formatting() {
        let mut sheet = parse_stylesheet("@block Button {\n  color: #333\n}").unwrap();
        let block = sheet.first_child(sheet.root()).unwrap();
        let rule = convert_at_rule(&mut sheet, block, ".Button".to_string());
        sheet.replace_with(block, rule);
        assert_eq!(sheet.to_string(), ".Button {\n  color: #333;\n}");
    }
}
