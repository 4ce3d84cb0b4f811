use super::{Clue, Hypothesis};

use Clue::{
    DotsProjector, EmfLevel5, Fingerprints, FreezingTemperatures, GhostOrbs, GhostWriting,
    SpiritBox,
};

pub(super) fn hypotheses() -> Vec<Hypothesis> {
    vec![
        Hypothesis::new("Spirit", [EmfLevel5, SpiritBox, GhostWriting]),
        Hypothesis::new("Wraith", [EmfLevel5, SpiritBox, DotsProjector]),
        Hypothesis::new("Phantom", [SpiritBox, Fingerprints, DotsProjector]),
        Hypothesis::new("Poltergeist", [SpiritBox, GhostWriting, Fingerprints]),
        Hypothesis::new("Banshee", [GhostOrbs, Fingerprints, DotsProjector]),
        Hypothesis::new("Jinn", [EmfLevel5, Fingerprints, FreezingTemperatures]),
        Hypothesis::new("Mare", [SpiritBox, GhostWriting, GhostOrbs]),
        Hypothesis::new("Revenant", [GhostWriting, GhostOrbs, FreezingTemperatures]),
        Hypothesis::new("Shade", [EmfLevel5, GhostWriting, FreezingTemperatures]),
        Hypothesis::new("Demon", [GhostWriting, Fingerprints, FreezingTemperatures]),
        Hypothesis::new("Yurei", [GhostOrbs, DotsProjector, FreezingTemperatures]),
        Hypothesis::new("Oni", [EmfLevel5, FreezingTemperatures, DotsProjector]),
        Hypothesis::new("Yokai", [SpiritBox, GhostOrbs, DotsProjector]),
        Hypothesis::new("Hantu", [GhostOrbs, Fingerprints, FreezingTemperatures]),
        Hypothesis::new("Goryo", [EmfLevel5, Fingerprints, DotsProjector]),
        Hypothesis::new("Myling", [EmfLevel5, GhostWriting, Fingerprints]),
        Hypothesis::new("Onryo", [SpiritBox, GhostOrbs, FreezingTemperatures]),
        Hypothesis::new("The Twins", [EmfLevel5, SpiritBox, FreezingTemperatures]),
        Hypothesis::new("Raiju", [EmfLevel5, GhostOrbs, DotsProjector]),
        Hypothesis::new("Obake", [EmfLevel5, Fingerprints, GhostOrbs]),
        // Always shows orbs in game, on top of its three real clues.
        Hypothesis::new("Mimic", [SpiritBox, Fingerprints, FreezingTemperatures])
            .with_decoys([GhostOrbs]),
        Hypothesis::new("Moroi", [SpiritBox, GhostWriting, FreezingTemperatures]),
        Hypothesis::new("Deogen", [SpiritBox, GhostWriting, DotsProjector]),
        Hypothesis::new("Thaye", [GhostOrbs, GhostWriting, DotsProjector]),
    ]
}
