use std::collections::HashMap;

use uuid::Uuid;

/// How a modifier combines into the attribute's effective value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModifierOp {
    Add,
    MultiplyBase,
    MultiplyTotal,
}

#[derive(Clone, Copy, Debug)]
pub struct Modifier {
    pub uuid: Uuid,
    pub amount: f64,
    pub op: ModifierOp,
}

/// An additive/multiplicative modifier stack over a base value, keyed by the
/// modifier's UUID so toggles stay idempotent.
#[derive(Clone, Debug)]
pub struct AttributeValue {
    base: f64,
    modifiers: HashMap<Uuid, Modifier>,
}

impl AttributeValue {
    pub fn new(base: f64) -> Self {
        Self {
            base,
            modifiers: HashMap::new(),
        }
    }

    pub fn base(&self) -> f64 {
        self.base
    }

    pub fn add_modifier(&mut self, modifier: Modifier) {
        self.modifiers.insert(modifier.uuid, modifier);
    }

    pub fn delete_modifier(&mut self, uuid: Uuid) {
        self.modifiers.remove(&uuid);
    }

    pub fn has_modifier(&self, uuid: Uuid) -> bool {
        self.modifiers.contains_key(&uuid)
    }

    pub fn value(&self) -> f64 {
        let mut value = self.base;
        for m in self.modifiers.values() {
            if m.op == ModifierOp::Add {
                value += m.amount;
            }
        }
        let mut result = value;
        for m in self.modifiers.values() {
            if m.op == ModifierOp::MultiplyBase {
                result += value * m.amount;
            }
        }
        for m in self.modifiers.values() {
            if m.op == ModifierOp::MultiplyTotal {
                result *= 1.0 + m.amount;
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::{AttributeValue, Modifier, ModifierOp};

    const KEY: Uuid = Uuid::from_u128(0x662a6b8d_da3e_4c1c_8813_96ea6097278d);

    #[test]
    fn operations_stack_in_order() {
        let mut attr = AttributeValue::new(0.1);
        attr.add_modifier(Modifier {
            uuid: Uuid::from_u128(1),
            amount: 0.05,
            op: ModifierOp::Add,
        });
        attr.add_modifier(Modifier {
            uuid: Uuid::from_u128(2),
            amount: 2.0,
            op: ModifierOp::MultiplyBase,
        });
        attr.add_modifier(Modifier {
            uuid: Uuid::from_u128(3),
            amount: 0.3,
            op: ModifierOp::MultiplyTotal,
        });
        // (0.1 + 0.05) -> + 0.15 * 2 -> * 1.3
        let expected = (0.15 + 0.3) * 1.3;
        assert!((attr.value() - expected).abs() < 1e-12);
    }

    #[test]
    fn toggling_by_uuid_is_idempotent() {
        let mut attr = AttributeValue::new(0.1);
        let sprint = Modifier {
            uuid: KEY,
            amount: 0.3,
            op: ModifierOp::MultiplyTotal,
        };
        for _ in 0..5 {
            attr.delete_modifier(KEY);
            if !attr.has_modifier(KEY) {
                attr.add_modifier(sprint);
            }
        }
        assert!((attr.value() - 0.13).abs() < 1e-12);
        attr.delete_modifier(KEY);
        assert_eq!(attr.value(), 0.1);
    }
}
