use crate::*;
use petgraph::graph::NodeIndex;

#[test]
fn hand_built_nitrile() {
    let mut mol = Mol::<Atom, Bond>::new();
    let c = mol.add_atom(Atom {
        atomic_num: 6,
        hydrogen_count: 1,
        ..Atom::default()
    });
    let n = mol.add_atom(Atom {
        atomic_num: 7,
        ..Atom::default()
    });
    let triple = mol.add_bond(c, n, Bond { order: BondOrder::Triple });

    assert_eq!((mol.atom_count(), mol.bond_count()), (2, 1));
    assert_eq!(mol.degree(n), 1);
    assert_eq!(mol.bond_between(n, c), Some(triple));
    check_valence(&mol).unwrap();
    let laid_out = generate_coordinates(&mol).unwrap();
    let [x0, _] = laid_out.atom(c).position_2d().unwrap();
    let [x1, _] = laid_out.atom(n).position_2d().unwrap();
    assert!(((x1 - x0).abs() - BOND_LENGTH).abs() < 1e-9);
}

#[test]
fn fragments_split_on_dots() {
    let mol = from_smiles("CCO.[Na+].[Cl-]").unwrap();
    let sizes: Vec<usize> = mol.fragments().iter().map(|f| f.len()).collect();
    assert_eq!(sizes, vec![3, 1, 1]);
}

#[test]
fn map_atoms_keeps_indices() {
    let mol = from_smiles("CN").unwrap();
    let placed = mol.map_atoms(|idx, atom| WithPosition2D::new(atom.clone(), [idx.index() as f64, 0.0]));
    assert_eq!(placed.atom(NodeIndex::new(1)).inner.atomic_num, 7);
    assert_eq!(placed.atom(NodeIndex::new(1)).position_2d(), Some([1.0, 0.0]));
    assert_eq!(placed.bond_count(), 1);
}

#[test]
fn bracket_atom_traits() {
    let mol = parse_smiles("[15NH3+]").unwrap();
    let atom = mol.atom(NodeIndex::new(0));

    assert_eq!(HasAtomicNum::atomic_num(atom), 7);
    assert_eq!(HasFormalCharge::formal_charge(atom), 1);
    assert_eq!(HasIsotope::isotope(atom), 15);
    assert_eq!(HasHydrogenCount::hydrogen_count(atom), 3);
    assert!(!HasAromaticity::is_aromatic(atom));

    let pyrrole = parse_smiles("c1cc[nH]c1").unwrap();
    assert!(pyrrole.atoms().all(|a| pyrrole.atom(a).is_aromatic()));
}

#[test]
fn with_position_2d() {
    let atom = Atom {
        atomic_num: 6,
        ..Atom::default()
    };
    let mut enriched = WithPosition2D::new(atom, [1.0, 2.0]);

    assert_eq!(HasPosition2D::position_2d(&enriched), Some([1.0, 2.0]));
    HasPosition2D::set_position_2d(&mut enriched, None);
    assert_eq!(HasPosition2D::position_2d(&enriched), None);
    assert_eq!(HasAtomicNum::atomic_num(&enriched), 6);
    assert_eq!(WithPosition2D::unplaced(Atom::default()).position_2d, None);
}

#[test]
fn pipeline_stages_compose() {
    let mol = from_smiles("c1ccccc1O").unwrap();
    check_valence(&mol).unwrap();
    let rings = RingInfo::sssr(&mol);
    assert_eq!(rings.num_rings(), 1);
    let laid_out = generate_coordinates(&mol).unwrap();
    let svg = MoleculeRenderer::standard(RenderOptions::default()).to_svg(&laid_out, 200, 150);
    assert!(svg.contains("<g id=\"bonds\">"));
    assert!(svg.contains(">O</text>"));
}

#[test]
fn telmisartan_depicts() {
    let renderer = ImageRenderer::new();
    let svg = renderer
        .render_svg("CCCc1nc2c(n1Cc1ccc(cc1)c1ccccc1C(=O)O)cc(cc2C)c1nc2c(n1C)cccc2")
        .unwrap();
    assert!(svg.matches("<line").count() > 30);
}

#[test]
fn defaults() {
    assert_eq!(BondOrder::default(), BondOrder::Single);
    let atom = Atom::default();
    assert_eq!(atom.atomic_num, 0);
    assert_eq!(atom.hydrogen_count, 0);
    assert!(!atom.is_aromatic);
    let mol = Mol::<Atom, Bond>::default();
    assert_eq!(mol.atom_count(), 0);
    assert_eq!(mol.graph().node_count(), 0);
}
