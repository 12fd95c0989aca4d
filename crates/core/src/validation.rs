//! Post-parse validation of obligatory flags and mutex groups.
//!
//! Only the root scope and the verb scopes actually entered are validated.
//! Violations are reported one at a time, in declaration order.

use indexmap::IndexMap;
use itertools::Itertools;

use crate::error::{Error, Result};
use crate::registry::{Flag, FlagSet, Scope};

impl FlagSet<'_> {
    /// Validates the root scope and then each entered verb scope, outermost
    /// first.
    pub(crate) fn validate(&self, entered: &[String]) -> Result<()> {
        let mut scope = &self.root;
        validate_scope(scope)?;

        for verb in entered {
            match scope.verb(verb) {
                Some(child) => scope = child,
                None => break,
            }
            validate_scope(scope)?;
        }

        Ok(())
    }
}

/// Groups the scope's flags by mutex group, in order of first appearance.
fn mutex_groups<'s, 'a>(scope: &'s Scope<'a>) -> IndexMap<&'s str, Vec<&'s Flag<'a>>> {
    let mut groups: IndexMap<&str, Vec<&Flag<'a>>> = IndexMap::new();

    for flag in scope.flags() {
        if let Some(group) = flag.tag().mutex_group.as_deref() {
            groups.entry(group).or_default().push(flag);
        }
    }

    groups
}

fn validate_scope(scope: &Scope<'_>) -> Result<()> {
    // Obligatory members of a mutex group are checked per group below.
    if let Some(missing) = scope.flags().iter().find(|flag| {
        flag.tag().obligatory && flag.tag().mutex_group.is_none() && !flag.was_specified()
    }) {
        return Err(Error::ObligatoryMissing(missing.display_name()));
    }

    for (group, members) in mutex_groups(scope) {
        let specified: Vec<String> = members
            .iter()
            .filter(|flag| flag.was_specified())
            .map(|flag| flag.display_name())
            .collect();

        if specified.len() > 1 {
            return Err(Error::MutexViolation {
                group: group.to_string(),
                members: specified,
            });
        }

        if specified.is_empty() && members.iter().any(|flag| flag.tag().obligatory) {
            return Err(Error::ObligatoryMissing(format!(
                "Exactly one of {}",
                members.iter().map(|flag| flag.display_name()).join(", ")
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::field::{Field, Options};
    use crate::registry::FlagSet;

    #[derive(Default)]
    struct Record {
        server: String,
        create: bool,
        delete: bool,
        list: bool,
        json: bool,
        yaml: bool,
    }

    impl Options for Record {
        fn fields(&mut self) -> Vec<Field<'_>> {
            vec![
                Field::flag("server", "-s, obligatory", &mut self.server),
                Field::flag("create", "-c, mutexgroup='action', obligatory", &mut self.create),
                Field::flag("delete", "-d, mutexgroup='action'", &mut self.delete),
                Field::flag("list", "-l, mutexgroup='action'", &mut self.list),
                Field::flag("json", "--json, mutexgroup='format'", &mut self.json),
                Field::flag("yaml", "--yaml, mutexgroup='format'", &mut self.yaml),
            ]
        }
    }

    fn parse(args: &[&str]) -> Result<(), Error> {
        let mut record = Record::default();
        let mut flag_set = FlagSet::new("test", &mut record)?;
        flag_set.parse(args)
    }

    #[test]
    fn test_obligatory_flag_reported_first() {
        assert_eq!(
            parse(&[]).unwrap_err(),
            Error::ObligatoryMissing("-s".to_string())
        );
    }

    #[test]
    fn test_obligatory_group_missing() {
        assert_eq!(
            parse(&["-s", "host"]).unwrap_err(),
            Error::ObligatoryMissing("Exactly one of -c, -d, -l".to_string())
        );
    }

    #[test]
    fn test_obligatory_group_satisfied_by_any_member() {
        assert!(parse(&["-s", "host", "-d"]).is_ok());
        assert!(parse(&["-s", "host", "-c"]).is_ok());
    }

    #[test]
    fn test_mutex_violation_names_offending_members() {
        assert_eq!(
            parse(&["-s", "host", "-c", "-l"]).unwrap_err(),
            Error::MutexViolation {
                group: "action".to_string(),
                members: vec!["-c".to_string(), "-l".to_string()],
            }
        );
    }

    #[test]
    fn test_optional_group_allows_zero_members() {
        assert!(parse(&["-s", "host", "-c"]).is_ok());
        assert!(matches!(
            parse(&["-s", "host", "-c", "--json", "--yaml"]).unwrap_err(),
            Error::MutexViolation { group, .. } if group == "format"
        ));
    }

    #[test]
    fn test_cluster_counts_towards_mutex() {
        assert!(matches!(
            parse(&["-s", "host", "-cd"]).unwrap_err(),
            Error::MutexViolation { .. }
        ));
    }
}
