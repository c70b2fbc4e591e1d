use anchor_lang::prelude::*;
use anchor_lang::solana_program::ed25519_program;
use anchor_lang::solana_program::keccak;
use anchor_lang::solana_program::sysvar::instructions::load_instruction_at_checked;

use crate::error::CustomErrorCode;

/// Off-chain-signed spending authorization. The Ed25519 signature itself
/// travels in a verification instruction placed at index 0 of the same
/// transaction; the program introspects it through the instructions sysvar,
/// so the owner never has to co-sign the transaction.
///
/// The owner grants a standing SPL delegation to the program's
/// permit_authority PDA once; each pull is then gated by a fresh permit bound
/// to a nonce and deadline, and moves exactly `value`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct PermitRequest {
    pub owner: Pubkey,
    pub spender: Pubkey,
    pub value: u64,
    pub nonce: u64,
    pub deadline: i64,
}

/// Message the owner signs: keccak256 over the program id and every permit
/// field, so a signature cannot be replayed against another program or with
/// altered terms.
pub fn permit_digest(program_id: &Pubkey, permit: &PermitRequest) -> [u8; 32] {
    keccak::hashv(&[
        program_id.as_ref(),
        permit.owner.as_ref(),
        permit.spender.as_ref(),
        &permit.value.to_le_bytes(),
        &permit.nonce.to_le_bytes(),
        &permit.deadline.to_le_bytes(),
    ])
    .to_bytes()
}

pub fn is_expired(deadline: i64, now: i64) -> bool {
    deadline < now
}

/// Parse a single-signature Ed25519 program instruction.
///
/// Instruction data layout:
/// [0-1]:   num_signatures (u16, little-endian)
/// [2-3]:   signature_offset
/// [4-5]:   signature_instruction_index
/// [6-7]:   public_key_offset
/// [8-9]:   public_key_instruction_index
/// [10-11]: message_data_offset
/// [12-13]: message_data_size
/// [14-15]: message_instruction_index
/// [16...]: data (signature, public key, message)
///
/// Returns: (signer_pubkey, signature, message)
pub fn parse_ed25519_instruction(ix_data: &[u8]) -> Result<(Pubkey, [u8; 64], [u8; 32])> {
    require!(
        ix_data.len() >= 16,
        CustomErrorCode::InvalidEd25519Instruction
    );

    let sig_offset = u16::from_le_bytes([ix_data[2], ix_data[3]]) as usize;
    let pubkey_offset = u16::from_le_bytes([ix_data[6], ix_data[7]]) as usize;
    let msg_offset = u16::from_le_bytes([ix_data[10], ix_data[11]]) as usize;
    let msg_size = u16::from_le_bytes([ix_data[12], ix_data[13]]) as usize;

    require!(
        ix_data.len() >= sig_offset + 64,
        CustomErrorCode::InvalidEd25519Instruction
    );
    require!(
        ix_data.len() >= pubkey_offset + 32,
        CustomErrorCode::InvalidEd25519Instruction
    );
    require!(
        ix_data.len() >= msg_offset + msg_size,
        CustomErrorCode::InvalidEd25519Instruction
    );

    // The signed message must be exactly the 32-byte permit digest
    require!(msg_size == 32, CustomErrorCode::InvalidEd25519Instruction);

    let mut signature = [0u8; 64];
    signature.copy_from_slice(&ix_data[sig_offset..sig_offset + 64]);

    let mut pubkey_bytes = [0u8; 32];
    pubkey_bytes.copy_from_slice(&ix_data[pubkey_offset..pubkey_offset + 32]);

    let mut message = [0u8; 32];
    message.copy_from_slice(&ix_data[msg_offset..msg_offset + 32]);

    Ok((Pubkey::new_from_array(pubkey_bytes), signature, message))
}

/// Validates a permit against the Ed25519 verification instruction at index 0.
///
/// Checks, in order: deadline, spender binding, that the runtime-verified
/// signature was produced by `permit.owner`, and that the signed message is
/// this permit's digest. Nonce consumption is enforced separately by the
/// PermitNonce account creation, which can only succeed once per
/// (owner, nonce) pair.
pub fn verify_permit(
    program_id: &Pubkey,
    permit: &PermitRequest,
    expected_spender: &Pubkey,
    now: i64,
    instructions_sysvar: &AccountInfo,
) -> Result<()> {
    require!(
        !is_expired(permit.deadline, now),
        CustomErrorCode::PermitExpired
    );
    require_keys_eq!(
        permit.spender,
        *expected_spender,
        CustomErrorCode::InvalidPermitSpender
    );

    let ed25519_ix = load_instruction_at_checked(0, instructions_sysvar)?;
    require!(
        ed25519_ix.program_id == ed25519_program::ID,
        CustomErrorCode::InvalidEd25519Instruction
    );

    let (signer, _signature, message) = parse_ed25519_instruction(&ed25519_ix.data)?;
    require_keys_eq!(
        signer,
        permit.owner,
        CustomErrorCode::InvalidPermitSignature
    );

    let digest = permit_digest(program_id, permit);
    require!(message == digest, CustomErrorCode::InvalidPermitSignature);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_permit() -> PermitRequest {
        PermitRequest {
            owner: Pubkey::new_unique(),
            spender: Pubkey::new_unique(),
            value: 1_000_000_000,
            nonce: 0,
            deadline: 1_700_000_000,
        }
    }

    #[test]
    fn digest_is_deterministic() {
        let program_id = Pubkey::new_unique();
        let permit = sample_permit();
        assert_eq!(
            permit_digest(&program_id, &permit),
            permit_digest(&program_id, &permit)
        );
    }

    #[test]
    fn digest_binds_every_field() {
        let program_id = Pubkey::new_unique();
        let base = sample_permit();
        let baseline = permit_digest(&program_id, &base);

        let mut altered = base.clone();
        altered.value += 1;
        assert_ne!(permit_digest(&program_id, &altered), baseline);

        let mut altered = base.clone();
        altered.nonce += 1;
        assert_ne!(permit_digest(&program_id, &altered), baseline);

        let mut altered = base.clone();
        altered.deadline += 1;
        assert_ne!(permit_digest(&program_id, &altered), baseline);

        let mut altered = base.clone();
        altered.spender = Pubkey::new_unique();
        assert_ne!(permit_digest(&program_id, &altered), baseline);

        assert_ne!(permit_digest(&Pubkey::new_unique(), &base), baseline);
    }

    fn build_ed25519_ix_data(pubkey: &[u8; 32], signature: &[u8; 64], message: &[u8; 32]) -> Vec<u8> {
        let pubkey_offset = 16u16;
        let sig_offset = pubkey_offset + 32;
        let msg_offset = sig_offset + 64;

        let mut data = Vec::with_capacity(16 + 32 + 64 + 32);
        data.extend_from_slice(&1u16.to_le_bytes()); // num_signatures
        data.extend_from_slice(&sig_offset.to_le_bytes());
        data.extend_from_slice(&u16::MAX.to_le_bytes()); // this instruction
        data.extend_from_slice(&pubkey_offset.to_le_bytes());
        data.extend_from_slice(&u16::MAX.to_le_bytes());
        data.extend_from_slice(&msg_offset.to_le_bytes());
        data.extend_from_slice(&32u16.to_le_bytes()); // message size
        data.extend_from_slice(&u16::MAX.to_le_bytes());
        data.extend_from_slice(pubkey);
        data.extend_from_slice(signature);
        data.extend_from_slice(message);
        data
    }

    #[test]
    fn parses_single_signature_instruction() {
        let pubkey = [7u8; 32];
        let signature = [9u8; 64];
        let message = [3u8; 32];
        let data = build_ed25519_ix_data(&pubkey, &signature, &message);

        let (parsed_key, parsed_sig, parsed_msg) = parse_ed25519_instruction(&data).unwrap();
        assert_eq!(parsed_key, Pubkey::new_from_array(pubkey));
        assert_eq!(parsed_sig, signature);
        assert_eq!(parsed_msg, message);
    }

    #[test]
    fn rejects_truncated_instruction() {
        let pubkey = [7u8; 32];
        let signature = [9u8; 64];
        let message = [3u8; 32];
        let data = build_ed25519_ix_data(&pubkey, &signature, &message);

        assert!(parse_ed25519_instruction(&data[..15]).is_err());
        assert!(parse_ed25519_instruction(&data[..data.len() - 1]).is_err());
    }

    #[test]
    fn rejects_wrong_message_size() {
        let pubkey = [7u8; 32];
        let signature = [9u8; 64];
        let message = [3u8; 32];
        let mut data = build_ed25519_ix_data(&pubkey, &signature, &message);
        data[12..14].copy_from_slice(&16u16.to_le_bytes());

        assert!(parse_ed25519_instruction(&data).is_err());
    }

    #[test]
    fn deadline_expiry_is_strict() {
        assert!(!is_expired(100, 100));
        assert!(!is_expired(101, 100));
        assert!(is_expired(99, 100));
    }
}
