pub mod atom;
pub mod helix;
pub mod molecule;

pub use atom::Atom;
pub use helix::Helix;
pub use molecule::{Molecule, MoleculeShape};
