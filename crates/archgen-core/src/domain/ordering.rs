//! Dependency ordering of required properties.
//!
//! The resolver is strictly positional: a default may only read properties
//! bound before it. Archetypes do not always declare properties that way
//! (`groupId = com.example.${groupName}` commonly comes first), so the list is
//! reordered before resolution with a stable topological sort.

use std::collections::HashMap;

use crate::domain::{entities::RequiredProperty, error::DomainError};

/// Reorder `properties` so that each one comes after every property its
/// default references.
///
/// `references` reports the names a property's default reads; names that are
/// not in the list are ignored. Among properties whose dependencies are met,
/// declaration order wins, so an already well-ordered list is returned
/// unchanged.
///
/// # Errors
/// [`DomainError::CyclicDefaults`] when defaults reference each other in a
/// cycle (including a default referencing its own key).
pub fn order_by_dependencies<F>(
    properties: Vec<RequiredProperty>,
    references: F,
) -> Result<Vec<RequiredProperty>, DomainError>
where
    F: Fn(&RequiredProperty) -> Vec<String>,
{
    let index: HashMap<&str, usize> = properties
        .iter()
        .enumerate()
        .map(|(i, p)| (p.key(), i))
        .collect();

    let dependencies: Vec<Vec<usize>> = properties
        .iter()
        .map(|p| {
            let mut deps: Vec<usize> = references(p)
                .iter()
                .filter_map(|name| index.get(name.as_str()).copied())
                .collect();
            deps.sort_unstable();
            deps.dedup();
            deps
        })
        .collect();

    let mut placed = vec![false; properties.len()];
    let mut order = Vec::with_capacity(properties.len());

    while order.len() < properties.len() {
        let next = (0..properties.len())
            .find(|&i| !placed[i] && dependencies[i].iter().all(|&d| placed[d]));

        match next {
            Some(i) => {
                placed[i] = true;
                order.push(i);
            }
            None => {
                return Err(DomainError::CyclicDefaults {
                    keys: find_cycle(&dependencies, &placed)
                        .into_iter()
                        .map(|i| properties[i].key().to_string())
                        .collect(),
                });
            }
        }
    }

    let mut slots: Vec<Option<RequiredProperty>> = properties.into_iter().map(Some).collect();
    Ok(order
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect())
}

/// Walk unmet dependencies from the first unplaced property until a node
/// repeats; the repeated stretch is the cycle.
fn find_cycle(dependencies: &[Vec<usize>], placed: &[bool]) -> Vec<usize> {
    let Some(start) = (0..placed.len()).find(|&i| !placed[i]) else {
        return Vec::new();
    };

    let mut path = vec![start];
    let mut current = start;
    loop {
        // Every unplaced node has at least one unplaced dependency here.
        let Some(&next) = dependencies[current].iter().find(|&&d| !placed[d]) else {
            return path;
        };
        if let Some(pos) = path.iter().position(|&i| i == next) {
            let mut cycle = path.split_off(pos);
            cycle.push(next);
            return cycle;
        }
        path.push(next);
        current = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reads `${name}` references without pulling in an evaluator.
    fn refs(p: &RequiredProperty) -> Vec<String> {
        let Some(template) = p.default_value() else {
            return Vec::new();
        };
        template
            .split("${")
            .skip(1)
            .filter_map(|rest| rest.split_once('}').map(|(name, _)| name.to_string()))
            .collect()
    }

    fn keys(props: &[RequiredProperty]) -> Vec<&str> {
        props.iter().map(|p| p.key()).collect()
    }

    #[test]
    fn well_ordered_list_is_unchanged() {
        let props = vec![
            RequiredProperty::new("groupName"),
            RequiredProperty::new("groupId").with_default("com.example.${groupName}"),
            RequiredProperty::new("serviceName"),
        ];
        let ordered = order_by_dependencies(props, refs).unwrap();
        assert_eq!(keys(&ordered), ["groupName", "groupId", "serviceName"]);
    }

    #[test]
    fn referenced_properties_move_first() {
        let props = vec![
            RequiredProperty::new("groupId").with_default("com.example.${groupName}"),
            RequiredProperty::new("artifactId").with_default("${serviceName}"),
            RequiredProperty::new("package").with_default("com.example.${groupName}"),
            RequiredProperty::new("groupName"),
            RequiredProperty::new("serviceName"),
        ];
        let ordered = order_by_dependencies(props, refs).unwrap();
        assert_eq!(
            keys(&ordered),
            ["groupName", "groupId", "serviceName", "artifactId", "package"]
        );
    }

    #[test]
    fn references_outside_the_list_are_ignored() {
        let props = vec![
            RequiredProperty::new("a").with_default("${external}"),
            RequiredProperty::new("b"),
        ];
        let ordered = order_by_dependencies(props, refs).unwrap();
        assert_eq!(keys(&ordered), ["a", "b"]);
    }

    #[test]
    fn transitive_chain_is_ordered() {
        let props = vec![
            RequiredProperty::new("c").with_default("${b}"),
            RequiredProperty::new("b").with_default("${a}"),
            RequiredProperty::new("a"),
        ];
        let ordered = order_by_dependencies(props, refs).unwrap();
        assert_eq!(keys(&ordered), ["a", "b", "c"]);
    }

    #[test]
    fn cycle_is_reported_with_its_keys() {
        let props = vec![
            RequiredProperty::new("x"),
            RequiredProperty::new("a").with_default("${b}"),
            RequiredProperty::new("b").with_default("${a}"),
        ];
        match order_by_dependencies(props, refs) {
            Err(DomainError::CyclicDefaults { keys }) => assert_eq!(keys, ["a", "b", "a"]),
            other => panic!("expected cycle, got {other:?}"),
        }
    }

    #[test]
    fn self_reference_is_a_cycle() {
        let props = vec![RequiredProperty::new("a").with_default("${a}-x")];
        assert!(matches!(
            order_by_dependencies(props, refs),
            Err(DomainError::CyclicDefaults { .. })
        ));
    }

    #[test]
    fn caller_can_exempt_properties() {
        // an exempted property (e.g. one with an override) breaks the cycle
        let props = vec![
            RequiredProperty::new("a").with_default("${b}"),
            RequiredProperty::new("b").with_default("${a}"),
        ];
        let ordered =
            order_by_dependencies(props, |p| if p.key() == "a" { Vec::new() } else { refs(p) })
                .unwrap();
        assert_eq!(keys(&ordered), ["a", "b"]);
    }
}
