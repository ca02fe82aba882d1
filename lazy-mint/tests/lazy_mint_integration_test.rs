// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

#[cfg(feature = "integration-tests")]
mod integration_test {
    use alloy::{
        primitives::{address, U256},
        providers::Provider,
        signers::local::PrivateKeySigner,
        sol,
        sol_types::SolEvent,
    };
    use eyre::Result;
    use lazy_minter::LazyMinter;
    use stylus_tools::devnet::{addresses::OWNER, Node, DEVNET_PRIVATE_KEY};

    sol! {
        #[sol(rpc)]
        interface IErc1155LazyMinting {
            struct SignedVoucher {
                uint256 tokenId;
                uint256 amount;
                uint256 minPrice;
                string uri;
                bytes signature;
            }

            function voucherDigest(SignedVoucher voucher) external view returns (bytes32);
            function recoverSigner(SignedVoucher voucher) external view returns (address);
            function redeem(address minter, address redeemer, SignedVoucher voucher) external payable returns (uint256);
            function isRedeemed(uint256 token_id) external view returns (bool);
            function admin() external view returns (address);
            function isMinter(address account) external view returns (bool);
            function availableToWithdraw(address account) external view returns (uint256);
            function balanceOf(address account, uint256 id) external view returns (uint256);
            function totalSupply(uint256 id) external view returns (uint256);
            function uri(uint256 id) external view returns (string memory);

            event VoucherTransfer(address indexed from, address indexed to, uint256 indexed tokenId, uint256 amount, bytes signature);

            error InvalidSignature();
            error SignerMismatch(address expected, address recovered);
            error UnauthorizedMinter(address signer);
            error InvalidAmount(uint256 token_id);
            error AlreadyRedeemed(uint256 token_id);
            error InsufficientPayment(uint256 required, uint256 paid);
        }
    }

    const TOKEN_URI: &str = "ipfs://bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi";

    fn to_call(voucher: lazy_minter::SignedVoucher) -> IErc1155LazyMinting::SignedVoucher {
        IErc1155LazyMinting::SignedVoucher {
            tokenId: voucher.token_id,
            amount: voucher.amount,
            minPrice: voucher.min_price,
            uri: voucher.uri,
            signature: voucher.signature,
        }
    }

    #[tokio::test]
    async fn lazy_mint() -> Result<()> {
        let devnode = Node::new().await?;
        let rpc = devnode.rpc();
        println!("Deploying contract to Nitro ({rpc})...");
        let (address, _, _) = stylus_tools::Deployer::builder()
            .rpc(rpc)
            .constructor_args(vec![OWNER.to_string(), "ipfs:/".to_owned()])
            .build()
            .deploy()?;
        println!("Deployed contract to {address}");
        let provider = devnode.create_provider().await?;
        let chain_id = provider.get_chain_id().await?;
        let contract = IErc1155LazyMinting::IErc1155LazyMintingInstance::new(address, provider);

        assert_eq!(contract.admin().call().await?, OWNER);
        assert!(contract.isMinter(OWNER).call().await?);

        let signer: PrivateKeySigner = DEVNET_PRIVATE_KEY.parse()?;
        let minter = LazyMinter::new(address, chain_id, signer);
        let voucher = minter
            .create_voucher_with_price(U256::from(1), U256::from(1000), U256::from(500), TOKEN_URI)
            .await?;

        // off-chain and on-chain digests agree
        let digest = contract.voucherDigest(to_call(voucher.clone())).call().await?;
        assert_eq!(digest, voucher.digest(&minter.domain()));
        let recovered = contract.recoverSigner(to_call(voucher.clone())).call().await?;
        assert_eq!(recovered, OWNER);

        let redeemer = address!("0x14723A09ACff6D2A60DcdF7aA4AFf308FDDC160C");
        let receipt = contract
            .redeem(OWNER, redeemer, to_call(voucher.clone()))
            .value(U256::from(500))
            .send()
            .await?
            .get_receipt()
            .await?;
        let transfers: Vec<_> = receipt
            .inner
            .logs()
            .iter()
            .filter_map(|log| {
                IErc1155LazyMinting::VoucherTransfer::decode_log_data(log.data()).ok()
            })
            .collect();
        assert_eq!(transfers.len(), 2);
        assert!(transfers[0].from.is_zero());
        assert_eq!(transfers[0].to, OWNER);
        assert_eq!(transfers[1].from, OWNER);
        assert_eq!(transfers[1].to, redeemer);
        assert_eq!(transfers[1].amount, U256::from(1000));
        assert_eq!(transfers[1].signature, voucher.signature);

        assert!(contract.isRedeemed(U256::from(1)).call().await?);
        assert_eq!(
            contract.balanceOf(redeemer, U256::from(1)).call().await?,
            U256::from(1000)
        );
        assert_eq!(contract.balanceOf(OWNER, U256::from(1)).call().await?, U256::ZERO);
        assert_eq!(contract.totalSupply(U256::from(1)).call().await?, U256::from(1000));
        assert_eq!(contract.uri(U256::from(1)).call().await?, TOKEN_URI);
        assert_eq!(
            contract.availableToWithdraw(OWNER).call().await?,
            U256::from(500)
        );

        // a voucher redeems once
        let err = contract
            .redeem(OWNER, redeemer, to_call(voucher))
            .value(U256::from(500))
            .call()
            .await
            .unwrap_err()
            .as_decoded_interface_error::<IErc1155LazyMinting::IErc1155LazyMintingErrors>()
            .unwrap();
        assert!(matches!(
            err,
            IErc1155LazyMinting::IErc1155LazyMintingErrors::AlreadyRedeemed(e)
                if e.token_id == U256::from(1)
        ));

        // a voucher signed by a stranger is refused
        let stranger = LazyMinter::new(address, chain_id, PrivateKeySigner::random());
        let forged = stranger
            .create_voucher(U256::from(2), U256::from(1), TOKEN_URI)
            .await?;
        let err = contract
            .redeem(stranger.address(), redeemer, to_call(forged))
            .call()
            .await
            .unwrap_err()
            .as_decoded_interface_error::<IErc1155LazyMinting::IErc1155LazyMintingErrors>()
            .unwrap();
        assert!(matches!(
            err,
            IErc1155LazyMinting::IErc1155LazyMintingErrors::UnauthorizedMinter(e)
                if e.signer == stranger.address()
        ));
        assert!(!contract.isRedeemed(U256::from(2)).call().await?);

        Ok(())
    }
}
