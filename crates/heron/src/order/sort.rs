use super::SortEntry;
use crate::graphlib::NodeId;
use std::cmp::Ordering;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortResult {
    pub vs: Vec<NodeId>,
    pub barycenter: Option<f64>,
    pub weight: Option<f64>,
}

/// Orders entries by barycenter. Ties fall back to the original index (reversed when
/// `bias_right`). Entries without a barycenter keep their original index position and the
/// sorted ones flow around them.
pub fn sort(entries: &[SortEntry], bias_right: bool) -> SortResult {
    let (mut sortable, mut unsortable): (Vec<&SortEntry>, Vec<&SortEntry>) =
        entries.iter().partition(|e| e.barycenter.is_some());

    // Popped from the back, smallest index first.
    unsortable.sort_by(|a, b| b.i.cmp(&a.i));
    sortable.sort_by(|a, b| {
        let (ab, bb) = (a.barycenter.unwrap_or(0.0), b.barycenter.unwrap_or(0.0));
        match ab.partial_cmp(&bb) {
            Some(Ordering::Less) => Ordering::Less,
            Some(Ordering::Greater) => Ordering::Greater,
            _ if bias_right => b.i.cmp(&a.i),
            _ => a.i.cmp(&b.i),
        }
    });

    let mut vs: Vec<NodeId> = Vec::with_capacity(entries.iter().map(|e| e.vs.len()).sum());
    let mut sum = 0.0;
    let mut weight = 0.0;
    let mut index = consume_unsortable(&mut vs, &mut unsortable, 0);
    for entry in sortable {
        index += entry.vs.len();
        vs.extend_from_slice(&entry.vs);
        let w = entry.weight.unwrap_or(0.0);
        sum += entry.barycenter.unwrap_or(0.0) * w;
        weight += w;
        index = consume_unsortable(&mut vs, &mut unsortable, index);
    }

    SortResult {
        vs,
        barycenter: (weight != 0.0).then(|| sum / weight),
        weight: (weight != 0.0).then_some(weight),
    }
}

fn consume_unsortable(vs: &mut Vec<NodeId>, unsortable: &mut Vec<&SortEntry>, mut index: usize) -> usize {
    while let Some(last) = unsortable.last() {
        if last.i > index {
            break;
        }
        vs.extend_from_slice(&last.vs);
        unsortable.pop();
        index += 1;
    }
    index
}
