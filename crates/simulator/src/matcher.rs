use types::Instruction;

/// Finds the instruction a (possibly corrupted) encoding word decodes to.
///
/// MATCHING RULE: the first instruction `t` in `candidates` with
/// `word & t.mask == t.opcode` wins. Several instructions may match the
/// same word (e.g. a hint encoding and its general form); the candidate
/// order is the priority order, so the caller must pass the catalog in
/// its canonical order every time. No scoring or most-specific-mask
/// preference is applied.
///
/// RETURNS: `None` when no instruction matches, i.e. the word is illegal.
pub fn find_target(word: u32, candidates: &[Instruction]) -> Option<&Instruction> {
    candidates.iter().find(|t| t.matches(word))
}
