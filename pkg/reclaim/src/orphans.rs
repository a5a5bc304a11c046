use crate::usage::Usage;

/// Allocated addresses that no consumer references, in allocation order.
/// Used but unallocated addresses are ignored.
pub fn find_orphans(allocated: &[String], usage: &Usage) -> Vec<String> {
    allocated
        .iter()
        .filter(|ip| !usage.addresses().any(|used| used == ip.as_str()))
        .cloned()
        .collect()
}
