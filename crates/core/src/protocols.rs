//! Standard capability sets for the common container interfaces.
//!
//! ```text
//! items ──► List ──► Stack
//!   └─────► Dictionary ──► Collection
//! ```

use crate::capability::Trait;

const ITEM_METHODS: &[&str] = &[
    "__iter__",
    "__setitem__",
    "__delitem__",
    "__getitem__",
    "__contains__",
];

fn items() -> Trait {
    ITEM_METHODS
        .iter()
        .fold(Trait::new("Items"), |t, name| t.method(name))
}

/// Indexable, mutable, searchable sequences.
pub fn list() -> Trait {
    Trait::new("List")
        .include(&items())
        .method("insert")
        .method("index")
}

/// A list that also supports `push` and `pop`.
pub fn stack() -> Trait {
    Trait::new("Stack")
        .include(&list())
        .method("push")
        .method("pop")
}

/// Dict-like objects: item access, membership and iteration.
pub fn dictionary() -> Trait {
    Trait::new("Dictionary").include(&items())
}

/// A dictionary with the bulk mapping operations.
pub fn collection() -> Trait {
    Trait::new("Collection")
        .include(&dictionary())
        .method("pop")
        .method("keys")
        .method("update")
        .method("values")
}

/// Every standard trait.
pub fn all() -> Vec<Trait> {
    vec![list(), stack(), dictionary(), collection()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::Function;
    use crate::kind::Kind;
    use crate::value::{Object, Value};

    #[test]
    fn test_list_trait() {
        assert!(list().test(&Value::list([1, 2])));
        assert!(!list().test(&Value::tuple([1, 2])));
        assert!(!list().test(&Value::Dict(vec![])));
    }

    #[test]
    fn test_dictionary_and_collection() {
        let dict = Value::Dict(vec![]);
        assert!(dictionary().test(&dict));
        assert!(collection().test(&dict));
        // lists have every item method but no `keys`
        assert!(dictionary().test(&Value::list([1])));
        assert!(!collection().test(&Value::list([1])));
    }

    #[test]
    fn test_stack_needs_push() {
        assert!(!stack().test(&Value::list([1])));

        let mut builder = Kind::builder("Deque");
        for name in ITEM_METHODS.iter().chain(&["insert", "index", "push", "pop"]) {
            builder = builder.method(*name, Function::opaque(*name));
        }
        let deque = Value::from(Object::new(&builder.build()));
        assert!(stack().test(&deque));
        assert!(list().test(&deque));
    }

    #[test]
    fn test_inclusion_flattens() {
        assert_eq!(list().len(), 7);
        assert_eq!(stack().len(), 9);
        assert_eq!(collection().len(), 9);
    }
}
