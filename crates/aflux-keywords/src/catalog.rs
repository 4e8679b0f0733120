//! Static catalog of the AFLOW keywords exposed by AFLUX.
//!
//! One constant per keyword, generated from the AAPI schema. [`ALL`] lists
//! them in schema order and [`lookup`] resolves a wire name.

use std::str::FromStr;

use crate::error::ExprError;
use crate::field::{Field, Status, WireType};

macro_rules! catalog {
    ($( $ident:ident => $name:literal, $wire:ident, $status:ident, $units:literal, $title:literal; )*) => {
        $(
            #[doc = concat!($title, " (`", $name, "`).")]
            pub const $ident: Field =
                Field::new($name, WireType::$wire, Status::$status, $units, $title);
        )*

        /// Every keyword in the catalog.
        pub const ALL: &[Field] = &[$($ident),*];
    };
}

catalog! {
    BRAVAIS_LATTICE_ORIG => "Bravais_lattice_orig", String, Optional, "", "original bravais lattice";
    BRAVAIS_LATTICE_RELAX => "Bravais_lattice_relax", String, Optional, "", "relaxed bravais lattice";
    EGAP => "Egap", Number, Mandatory, "eV", "electronic energy band gap";
    EGAP_FIT => "Egap_fit", Number, Mandatory, "eV", "fitted band gap";
    EGAP_TYPE => "Egap_type", String, Mandatory, "", "band gap type";
    PV_ATOM => "PV_atom", Number, Mandatory, "eV/atom", "atomic pressure*volume";
    PV_CELL => "PV_cell", Number, Mandatory, "eV", "unit cell pressure*volume";
    PEARSON_SYMBOL_ORIG => "Pearson_symbol_orig", String, Mandatory, "", "original Pearson symbol";
    PEARSON_SYMBOL_RELAX => "Pearson_symbol_relax", String, Mandatory, "", "relaxed Pearson symbol";
    PULAY_STRESS => "Pulay_stress", Number, Mandatory, "kbar", "Pulay Stress";
    PULLAY_STRESS => "Pullay_stress", Number, Mandatory, "kbar", "Pulay Stress";
    AEL_BULK_MODULUS_REUSS => "ael_bulk_modulus_reuss", Number, Optional, "GPa", "AEL Reuss bulk modulus";
    AEL_BULK_MODULUS_VOIGT => "ael_bulk_modulus_voigt", Number, Optional, "GPa", "AEL Voigt bulk modulus";
    AEL_BULK_MODULUS_VRH => "ael_bulk_modulus_vrh", Number, Optional, "GPa", "AEL VRH bulk modulus";
    AEL_ELASTIC_ANISTROPY => "ael_elastic_anistropy", Number, Optional, "", "AEL elastic anistropy";
    AEL_POISSON_RATIO => "ael_poisson_ratio", Number, Optional, "", "AEL Poisson ratio";
    AEL_SHEAR_MODULUS_REUSS => "ael_shear_modulus_reuss", Number, Optional, "GPa", "AEL Reuss shear modulus";
    AEL_SHEAR_MODULUS_VOIGT => "ael_shear_modulus_voigt", Number, Optional, "GPa", "AEL Voigt shear modulus";
    AEL_SHEAR_MODULUS_VRH => "ael_shear_modulus_vrh", Number, Optional, "GPa", "AEL VRH shear modulus";
    AFLOW_VERSION => "aflow_version", String, Optional, "", "aflow version";
    AFLOWLIB_DATE => "aflowlib_date", String, Optional, "", "material generation date";
    AFLOWLIB_ENTRIES => "aflowlib_entries", Strings, Conditional, "", "aflowlib entries";
    AFLOWLIB_ENTRIES_NUMBER => "aflowlib_entries_number", Number, Conditional, "", "aflowlib entry count";
    AFLOWLIB_VERSION => "aflowlib_version", String, Optional, "", "aflowlib version";
    AGL_ACOUSTIC_DEBYE => "agl_acoustic_debye", Number, Optional, "K", "AGL acoustic Debye temperature";
    AGL_BULK_MODULUS_ISOTHERMAL_300K => "agl_bulk_modulus_isothermal_300K", Number, Optional, "GPa", "AGL isothermal bulk modulus 300K";
    AGL_BULK_MODULUS_STATIC_300K => "agl_bulk_modulus_static_300K", Number, Optional, "GPa", "AGL static bulk modulus 300K";
    AGL_DEBYE => "agl_debye", Number, Optional, "K", "AGL Debye temperature";
    AGL_GRUNEISEN => "agl_gruneisen", Number, Optional, "", "AGL Gruneisen parameter";
    AGL_HEAT_CAPACITY_CP_300K => "agl_heat_capacity_Cp_300K", Number, Optional, "kB/cell", "AGL heat capacity Cp";
    AGL_HEAT_CAPACITY_CV_300K => "agl_heat_capacity_Cv_300K", Number, Optional, "kB/cell", "AGL heat capacity Cv";
    AGL_THERMAL_CONDUCTIVITY_300K => "agl_thermal_conductivity_300K", Number, Optional, "W/m*K", "AGL thermal conductivity";
    AGL_THERMAL_EXPANSION_300K => "agl_thermal_expansion_300K", Number, Optional, "1/K", "AGL thermal expansion";
    AUID => "auid", String, Mandatory, "", "AFLOWLIB Unique Identifier";
    AURL => "aurl", String, Mandatory, "", "AFLOWLIB Uniform Resource Locator";
    AUTHOR => "author", Strings, Optional, "", "author";
    BADER_ATOMIC_VOLUMES => "bader_atomic_volumes", Numbers, Optional, "Å³", "atomic volume per atom";
    BADER_NET_CHARGES => "bader_net_charges", Numbers, Optional, "electrons", "partial charge per atom";
    CALCULATION_CORES => "calculation_cores", Number, Optional, "", "used CPU cores";
    CALCULATION_MEMORY => "calculation_memory", Number, Optional, "Megabytes", "used RAM";
    CALCULATION_TIME => "calculation_time", Number, Optional, "seconds", "used time";
    CATALOG => "catalog", String, Optional, "", "catalog";
    CODE => "code", String, Optional, "", "ab initio code";
    COMPOSITION => "composition", Numbers, Optional, "", "composition";
    COMPOUND => "compound", String, Mandatory, "", "chemical formula";
    CORRESPONDING => "corresponding", Strings, Optional, "", "coresponding";
    DATA_API => "data_api", String, Mandatory, "", "REST API version";
    DATA_LANGUAGE => "data_language", Strings, Optional, "", "data language";
    DATA_SOURCE => "data_source", Strings, Optional, "", "data source";
    DELTA_ELECTRONIC_ENERGY_CONVERGENCE => "delta_electronic_energy_convergence", Number, Optional, "", "Electronic Energy of Convergence Step";
    DELTA_ELECTRONIC_ENERGY_THRESHOLD => "delta_electronic_energy_threshold", Number, Optional, "", "Electronic Energy of Convergence Threshold";
    DENSITY => "density", Number, Optional, "grams/cm³", "mass density";
    DFT_TYPE => "dft_type", Strings, Optional, "", "DFT type";
    EENTROPY_ATOM => "eentropy_atom", Number, Optional, "eV/atom", "atomistic electronic entropy";
    EENTROPY_CELL => "eentropy_cell", Number, Optional, "eV/atom", "unit cell electronic entropy";
    ENERGY_ATOM => "energy_atom", Number, Mandatory, "eV/atom", "atomic energy";
    ENERGY_CELL => "energy_cell", Number, Mandatory, "eV", "unit cell energy";
    ENERGY_CUTOFF => "energy_cutoff", Numbers, Optional, "eV", "energy cutoff";
    ENTHALPY_ATOM => "enthalpy_atom", Number, Mandatory, "eV/atom", "atomic enthalpy";
    ENTHALPY_CELL => "enthalpy_cell", Number, Mandatory, "eV", "unit cell enthalpy";
    ENTHALPY_FORMATION_ATOM => "enthalpy_formation_atom", Number, Mandatory, "eV/atom", "atomic formation enthalpy";
    ENTHALPY_FORMATION_CELL => "enthalpy_formation_cell", Number, Mandatory, "eV", "unit cell formation enthalpy";
    ENTROPIC_TEMPERATURE => "entropic_temperature", Number, Mandatory, "Kelvin", "entropic temperature";
    FILES => "files", Strings, Conditional, "", "I/O files";
    FORCES => "forces", Matrix, Optional, "eV/Å", "Quantum Forces";
    GEOMETRY => "geometry", Numbers, Mandatory, "Å", "unit cell basis";
    KEYWORDS => "keywords", Strings, Mandatory, "", "Title";
    KPOINTS => "kpoints", Kpoints, Optional, "", "K-point mesh";
    LATTICE_SYSTEM_ORIG => "lattice_system_orig", String, Mandatory, "", "original lattice system";
    LATTICE_SYSTEM_RELAX => "lattice_system_relax", String, Mandatory, "", "relaxed lattice system";
    LATTICE_VARIATION_ORIG => "lattice_variation_orig", String, Mandatory, "", "original lattice variation";
    LATTICE_VARIATION_RELAX => "lattice_variation_relax", String, Mandatory, "", "relaxed lattice variation";
    LDAU_TLUJ => "ldau_TLUJ", Numbers, Mandatory, "", "on site coulomb interaction";
    LOOP => "loop", Strings, Optional, "", "process category";
    NATOMS => "natoms", Number, Mandatory, "", "number of atoms in unit cell";
    NBONDXX => "nbondxx", Numbers, Optional, "Å", "nearest neighbor bond lengths";
    NODE_CPU_CORES => "node_CPU_Cores", Number, Optional, "", "available CPU cores";
    NODE_CPU_MHZ => "node_CPU_MHz", Number, Optional, "Megahertz", "CPU rate";
    NODE_CPU_MODEL => "node_CPU_Model", String, Optional, "", "CPU model";
    NODE_RAM_GB => "node_RAM_GB", Number, Optional, "Gigabytes", "available RAM";
    NSPECIES => "nspecies", Number, Mandatory, "", "species count";
    POSITIONS_CARTESIAN => "positions_cartesian", Matrix, Mandatory, "Å", "relaxed absolute positions";
    POSITIONS_FRACTIONAL => "positions_fractional", Matrix, Mandatory, "", "relaxed relative positions";
    PRESSURE => "pressure", Number, Mandatory, "kbar", "external pressure";
    PRESSURE_FINAL => "pressure_final", Number, Mandatory, "kbar", "resulting pressure";
    PRESSURE_RESIDUAL => "pressure_residual", Number, Mandatory, "kbar", "residual pressure";
    PROTOTYPE => "prototype", String, Mandatory, "", "original prototype";
    SCINTILLATION_ATTENUATION_LENGTH => "scintillation_attenuation_length", Number, Mandatory, "cm", "attenuation length";
    SG => "sg", Strings, Mandatory, "", "space group of compound";
    SG2 => "sg2", Strings, Mandatory, "", "refined space group of compound";
    SPACEGROUP_ORIG => "spacegroup_orig", Number, Mandatory, "", "original space group number";
    SPACEGROUP_RELAX => "spacegroup_relax", Number, Mandatory, "", "relaxed space group number";
    SPECIES => "species", Strings, Mandatory, "", "atomic species";
    SPECIES_PP => "species_pp", Strings, Mandatory, "", "pseudopotential of chemical speciess";
    SPECIES_PP_ZVAL => "species_pp_ZVAL", Numbers, Optional, "electrons", "valence atoms per species";
    SPECIES_PP_VERSION => "species_pp_version", Strings, Mandatory, "", "pseudopotential version and species";
    SPIND => "spinD", Vector, Mandatory, "μB", "spin decomposition over unit cell";
    SPINF => "spinF", Number, Mandatory, "μB", "magnetization of unit cell at Fermi level";
    SPIN_ATOM => "spin_atom", Number, Mandatory, "μB/atom", "atomic spin polarization";
    SPIN_CELL => "spin_cell", Number, Mandatory, "μB", "unit cell spin polarization";
    SPONSOR => "sponsor", Strings, Optional, "", "sponsor";
    STOICH => "stoich", Numbers, Optional, "", "unit cell stoichiometry";
    STOICHIOMETRY => "stoichiometry", Numbers, Mandatory, "", "unit cell stoichiometry";
    STRESS_TENSOR => "stress_tensor", Numbers, Mandatory, "", "Stress Tensor";
    VALENCE_CELL_IUPAC => "valence_cell_iupac", Number, Mandatory, "", "unit cell IUPAC valence";
    VALENCE_CELL_STD => "valence_cell_std", Number, Mandatory, "", "unit cell standard valence";
    VOLUME_ATOM => "volume_atom", Number, Mandatory, "Å³/atom", "atomic volume";
    VOLUME_CELL => "volume_cell", Number, Mandatory, "Å³", "unit cell volume";
}

/// Resolves a keyword by its exact wire name.
pub fn lookup(name: &str) -> Option<Field> {
    ALL.iter().copied().find(|field| field.name() == name)
}

impl FromStr for Field {
    type Err = ExprError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        lookup(name).ok_or_else(|| ExprError::UnknownField(name.to_string()))
    }
}
