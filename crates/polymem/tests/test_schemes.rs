//! Scheme-level guarantees: slot bijection, conflict-free footprints,
//! legality conditions, and shape validation.

use polymem::{AccessType, BlockPattern, Geometry, Layout, PolymemError, Scheme};

const GRIDS: [(usize, usize); 6] = [(2, 2), (2, 4), (4, 2), (4, 4), (2, 8), (3, 2)];

/// Every coordinate maps to a distinct (bank, offset) slot and every slot
/// is hit, for every scheme over a spread of grids.
#[test]
fn test_slot_bijection_exhaustive() {
    for scheme in Scheme::ALL {
        for (p, q) in GRIDS {
            let lanes = p * q;
            let (n, m) = (4 * lanes / p * p, 2 * lanes);
            let geometry = Geometry::new(p, q, n, m).unwrap();
            let layout = Layout::new(geometry, scheme);
            let bank_len = geometry.bank_len();
            let mut hits = vec![0u32; lanes * bank_len];
            for i in 0..n {
                for j in 0..m {
                    let (bank, offset) = layout.slot(i, j);
                    hits[bank * bank_len + offset] += 1;
                }
            }
            assert!(
                hits.iter().all(|&h| h == 1),
                "slot map not bijective for {scheme:?} on {p}x{q}"
            );
        }
    }
}

fn anchors_for(
    access: AccessType,
    p: usize,
    q: usize,
    n: usize,
    m: usize,
) -> Vec<(usize, usize)> {
    let lanes = p * q;
    let mut anchors = Vec::new();
    let (i_max, j_min, j_max) = match access {
        AccessType::Rectangle => (n - p, 0, m - q),
        AccessType::Row => (n - 1, 0, m - lanes),
        AccessType::Column => (n - lanes, 0, m - 1),
        AccessType::TransposedRectangle => (n - q, 0, m - p),
        AccessType::MainDiagonal => (n - lanes, 0, m - lanes),
        AccessType::SecondaryDiagonal => (n - lanes, lanes - 1, m - 1),
    };
    for i in 0..=i_max {
        for j in j_min..=j_max {
            anchors.push((i, j));
        }
    }
    anchors
}

/// Every legal (scheme, access type) pair yields a footprint whose members
/// land on all `p*q` banks, one each, at every anchor the scheme serves
/// unrestricted. RowColumn rectangles are the one alignment-restricted
/// case and are filtered accordingly.
#[test]
fn test_conflict_free_footprints_exhaustive() {
    for scheme in Scheme::ALL {
        for (p, q) in GRIDS {
            let lanes = p * q;
            let (n, m) = (2 * lanes, 2 * lanes);
            if n % p != 0 || m % q != 0 {
                continue;
            }
            let layout = Layout::new(Geometry::new(p, q, n, m).unwrap(), scheme);
            for access in AccessType::ALL {
                if !scheme.supports(access, p, q) {
                    continue;
                }
                for (i, j) in anchors_for(access, p, q, n, m) {
                    if scheme == Scheme::RowColumn
                        && access == AccessType::Rectangle
                        && i % p != 0
                        && j % q != 0
                    {
                        continue;
                    }
                    let pattern = BlockPattern::resolve(&layout, access, i, j).unwrap();
                    assert!(
                        pattern.is_conflict_free(),
                        "bank conflict for {scheme:?}/{access:?} at ({i}, {j}) on {p}x{q}"
                    );
                }
            }
        }
    }
}

/// The worked example: p=2, q=4, N=M=96, RowColumn rows. The eight
/// elements (3, 8)..(3, 15) resolve to banks 0..8 with no repeats.
#[test]
fn test_row_footprint_covers_all_banks() {
    let layout = Layout::new(Geometry::new(2, 4, 96, 96).unwrap(), Scheme::RowColumn);
    let pattern = BlockPattern::resolve(&layout, AccessType::Row, 3, 8).unwrap();
    let mut banks = pattern.banks().to_vec();
    banks.sort_unstable();
    assert_eq!(banks, (0..8).collect::<Vec<_>>());
}

#[test]
fn test_diagonal_legality_follows_coprimality() {
    // p=2, q=4: gcd(2, 5) = 1 and gcd(2, 3) = 1, both diagonals legal
    let layout = Layout::new(Geometry::new(2, 4, 32, 32).unwrap(), Scheme::RectangleRow);
    assert!(BlockPattern::resolve(&layout, AccessType::MainDiagonal, 0, 0).is_ok());
    assert!(BlockPattern::resolve(&layout, AccessType::SecondaryDiagonal, 0, 31).is_ok());

    // p=2, q=3: gcd(2, 4) = 2 and gcd(2, 2) = 2, both diagonals illegal
    let layout = Layout::new(Geometry::new(2, 3, 12, 12).unwrap(), Scheme::RectangleRow);
    for access in [AccessType::MainDiagonal, AccessType::SecondaryDiagonal] {
        assert_eq!(
            BlockPattern::resolve(&layout, access, 0, 6).unwrap_err(),
            PolymemError::IllegalAccessType {
                scheme: Scheme::RectangleRow,
                access,
            }
        );
    }
}

#[test]
fn test_rectangle_column_diagonals() {
    // p=4, q=3: gcd(5, 3) = 1 and gcd(3, 3) = 3, only the main diagonal
    let layout = Layout::new(Geometry::new(4, 3, 24, 24).unwrap(), Scheme::RectangleColumn);
    let md = BlockPattern::resolve(&layout, AccessType::MainDiagonal, 1, 2).unwrap();
    assert!(md.is_conflict_free());
    assert!(BlockPattern::resolve(&layout, AccessType::SecondaryDiagonal, 0, 23).is_err());
}

#[test]
fn test_shape_validation() {
    assert_eq!(
        Geometry::new(4, 2, 10, 16).unwrap_err(),
        PolymemError::InvalidShape {
            p: 4,
            q: 2,
            rows: 10,
            cols: 16
        }
    );
    assert!(Geometry::new(2, 4, 16, 10).is_err());
    assert!(Geometry::new(2, 4, 16, 16).is_ok());
}
