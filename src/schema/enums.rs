use super::choice::{choice, choice_serde, Choice};

choice!(Sex { F => "F", M => "M", I => "I" });

choice!(GestationType { Ultrasound => "U / S", Lmp => "LMP" });

choice!(BabyFrom {
    Theatre => "Theatre",
    Labour => "Labour",
    Postnatal => "Postnatal",
    Paeds => "Paeds",
    Referral => "Referral",
    Home => "Home",
});

/// Unit of the infant's age. Also accepts `days`/`hours` in any case and exports that short form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeUnits {
    Days,
    Hours,
    Empty,
}

impl Choice for AgeUnits {
    const NAME: &'static str = "AgeUnits";
    const EMPTY: Self = AgeUnits::Empty;
    const MEMBERS: &'static [Self] = &[AgeUnits::Days, AgeUnits::Hours];

    fn label(self) -> &'static str {
        match self {
            AgeUnits::Days => "In days",
            AgeUnits::Hours => "In hours",
            AgeUnits::Empty => "-1",
        }
    }

    fn export_label(self) -> &'static str {
        match self {
            AgeUnits::Days => "days",
            AgeUnits::Hours => "hours",
            AgeUnits::Empty => "-1",
        }
    }

    fn alias(text: &str) -> Option<Self> {
        match text.to_lowercase().as_str() {
            "days" => Some(AgeUnits::Days),
            "hours" => Some(AgeUnits::Hours),
            _ => None,
        }
    }
}

choice_serde!(AgeUnits);

choice!(YesNo { Yes => "Yes", No => "No" });

choice!(YesNoUnknown { Yes => "Yes", No => "No", Unknown => "Unkn" });

choice!(PosNegUnknown { Pos => "Pos", Neg => "Neg", Unknown => "Unkn" });

choice!(BloodGroup { A => "A", B => "B", AB => "AB", O => "O", Unknown => "Unkn" });

choice!(Delivery {
    Svd => "SVD",
    Cs => "CS",
    Breech => "Breech",
    Forceps => "Forceps",
    Vacuum => "Vacuum",
});

choice!(CsType { Emergency => "Emergency", Elective => "Elective" });

choice!(MaternalStatus { Well => "Well", Unwell => "Unwell", Deceased => "Deceased" });

choice!(BornWhere { HomeOrRoadside => "Home/Roadside", OtherFacility => "Other facility" });

choice!(Skin {
    Normal => "Normal",
    Bruising => "Bruising",
    Rash => "Rash",
    Pustules => "Pustules",
    Mottling => "Mottling",
});

choice!(Appearance { Well => "Well", Sick => "Sick", Dysmorphic => "Dysmorphic" });

// jaundice and pallor
choice!(PlusGrade { Absent => "None", Mild => "+", Severe => "+++" });

choice!(Cry { Normal => "Normal", WeakOrAbsent => "Weak/Absent", Hoarse => "Hoarse" });

// xiphoid and intercostal recession
choice!(Recession { Absent => "None", Mild => "Mild", Severe => "Severe" });

choice!(Tone { Normal => "Normal", Increased => "Increased", Decreased => "Decreased" });

choice!(Umbilicus {
    Clean => "Clean",
    LocalPus => "Local Pus",
    PusRedSkin => "Pus + Red Skin",
    Others => "Others",
});

choice!(Selected { Selected => "Selected" });

choice!(DiagnosisRank { Primary => "1", Secondary => "2" });
