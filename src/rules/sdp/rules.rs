//! The SDP rule table.
//!
//! One `RuleSet` per line type. Within a set, order is priority: the decoder
//! takes the first rule whose pattern matches the whole line, and the encoder
//! emits a scope's lines in this order. Keep catch-alls last.
//!
//! Patterns are written unanchored; the engine anchors them. Rules without
//! `reg` match `(.*)`, rules without `format` render `%s`.

use super::templates;
use crate::{Rule, RuleSet};

pub(crate) fn get() -> Vec<RuleSet> {
    vec![
        RuleSet::new('v', vec![rule! {
            // v=0
            name: "version",
            reg: r"(\d*)",
            types: "d",
        }]),
        RuleSet::new('o', vec![rule! {
            // o=- 20518 0 IN IP4 203.0.113.1
            name: "origin",
            reg: r"(\S*) (\d*) (\d*) (\S*) IP(\d) (\S*)",
            names: ["username", "sessionId", "sessionVersion", "netType", "ipVer", "address"],
            types: "sddsds",
            format: "%s %s %d %s IP%d %s",
        }]),
        // Free-text lines are kept verbatim.
        RuleSet::new('s', vec![rule! { name: "name", }]),
        RuleSet::new('i', vec![rule! { name: "description", }]),
        RuleSet::new('u', vec![rule! { name: "uri", }]),
        RuleSet::new('e', vec![rule! { name: "email", }]),
        RuleSet::new('p', vec![rule! { name: "phone", }]),
        RuleSet::new('z', vec![rule! { name: "timezones", }]),
        RuleSet::new('r', vec![rule! { name: "repeats", }]),
        RuleSet::new('t', vec![rule! {
            // t=0 0
            name: "timing",
            reg: r"(\d*) (\d*)",
            names: ["start", "stop"],
            types: "dd",
            format: "%d %d",
        }]),
        RuleSet::new('c', vec![rule! {
            // c=IN IP4 10.47.197.26
            name: "connection",
            reg: r"IN IP(\d) (\S*)",
            names: ["version", "ip"],
            types: "ds",
            format: "IN IP%d %s",
        }]),
        RuleSet::new('b', vec![rule! {
            // b=AS:4000
            push: "bandwidth",
            reg: r"(TIAS|AS|CT|RR|RS):(\d*)",
            names: ["type", "limit"],
            types: "sd",
            format: "%s:%s",
        }]),
        RuleSet::new('m', vec![rule! {
            // m=video 51744 RTP/AVP 126 97 98 34 31
            reg: r"(\w*) (\d*) ([\w/]*)(?: (.*))?",
            names: ["type", "port", "protocol", "payloads"],
            types: "sdss",
            format: "%s %d %s %s",
        }]),
        RuleSet::new('a', attributes()),
    ]
}

fn attributes() -> Vec<Rule> {
    vec![
        rule! {
            // a=rtpmap:110 opus/48000/2
            push: "rtp",
            reg: r"rtpmap:(\d*) ([\w\-.]*)(?:\s*/(\d*)(?:\s*/(\S*))?)?",
            names: ["payload", "codec", "rate", "encoding"],
            types: "dsdd",
            format_fn: templates::rtpmap,
        },
        rule! {
            // a=fmtp:108 profile-level-id=24;object=23;bitrate=64000
            // a=fmtp:111 minptime=10; useinbandfec=1
            push: "fmtp",
            reg: r"fmtp:(\d*) ([\S| ]*)",
            names: ["payload", "config"],
            types: "ds",
            format: "fmtp:%d %s",
        },
        rule! {
            // a=control:streamid=0
            name: "control",
            reg: r"control:(.*)",
            format: "control:%s",
        },
        rule! {
            // a=rtcp:65179 IN IP4 193.84.77.194
            name: "rtcp",
            reg: r"rtcp:(\d*)(?: (\S*) IP(\d) (\S*))?",
            names: ["port", "netType", "ipVer", "address"],
            types: "dsds",
            format_fn: templates::rtcp,
        },
        rule! {
            // a=rtcp-fb:98 trr-int 100
            push: "rtcpFbTrrInt",
            reg: r"rtcp-fb:(\*|\d*) trr-int (\d*)",
            names: ["payload", "value"],
            types: "sd",
            format: "rtcp-fb:%s trr-int %d",
        },
        rule! {
            // a=rtcp-fb:98 nack rpsi
            push: "rtcpFb",
            reg: r"rtcp-fb:(\*|\d*) ([\w_-]*)(?: ([\w_-]*))?",
            names: ["payload", "type", "subtype"],
            types: "sss",
            format_fn: templates::rtcp_fb,
        },
        rule! {
            // a=extmap:2 urn:ietf:params:rtp-hdrext:toffset
            // a=extmap:1/recvonly URI-gps-string
            // a=extmap:3 urn:ietf:params:rtp-hdrext:encrypt urn:ietf:params:rtp-hdrext:smpte-tc 25@600/24
            push: "ext",
            reg: r"extmap:(\d+)(?:/(\w+))?(?: (urn:ietf:params:rtp-hdrext:encrypt))? (\S*)(?: (\S*))?",
            names: ["value", "direction", "encrypt-uri", "uri", "config"],
            types: "dssss",
            format_fn: templates::extmap,
        },
        rule! {
            // a=extmap-allow-mixed
            name: "extmapAllowMixed",
            reg: r"(extmap-allow-mixed)",
        },
        rule! {
            // a=crypto:1 AES_CM_128_HMAC_SHA1_80 inline:PS1uQCVeeCFCanVmcjkpPywjNWhcYD0mXXtxaVBR|2^20|1:32
            push: "crypto",
            reg: r"crypto:(\d*) ([\w_]*) (\S*)(?: (\S*))?",
            names: ["id", "suite", "config", "sessionConfig"],
            types: "dsss",
            format_fn: templates::crypto,
        },
        rule! {
            // a=setup:actpass
            name: "setup",
            reg: r"setup:(\w*)",
            format: "setup:%s",
        },
        rule! {
            // a=connection:new
            name: "connectionType",
            reg: r"connection:(new|existing)",
            format: "connection:%s",
        },
        rule! {
            // a=mid:1
            name: "mid",
            reg: r"mid:([^\s]*)",
            format: "mid:%s",
        },
        rule! {
            // a=msid:0c8b064d-d807-43b4-b434-f92a889d8587 98178685-d409-46e0-8e16-7ef0db0db64a
            name: "msid",
            reg: r"msid:(.*)",
            format: "msid:%s",
        },
        rule! {
            // a=ptime:20
            name: "ptime",
            reg: r"ptime:(\d*(?:\.\d*)*)",
            types: "d",
            format: "ptime:%d",
        },
        rule! {
            // a=maxptime:60
            name: "maxptime",
            reg: r"maxptime:(\d*(?:\.\d*)*)",
            types: "d",
            format: "maxptime:%d",
        },
        rule! {
            // a=sendrecv
            name: "direction",
            reg: r"(sendrecv|recvonly|sendonly|inactive)",
        },
        rule! {
            // a=ice-lite
            name: "icelite",
            reg: r"(ice-lite)",
        },
        rule! {
            // a=ice-ufrag:F7gI
            name: "iceUfrag",
            reg: r"ice-ufrag:(\S*)",
            format: "ice-ufrag:%s",
        },
        rule! {
            // a=ice-pwd:x9cml/YzichV2+XlhiMu8g
            name: "icePwd",
            reg: r"ice-pwd:(\S*)",
            format: "ice-pwd:%s",
        },
        rule! {
            // a=fingerprint:SHA-1 00:11:22:33:44:55:66:77:88:99:AA:BB:CC:DD:EE:FF:00:11:22:33
            name: "fingerprint",
            reg: r"fingerprint:(\S*) (\S*)",
            names: ["type", "hash"],
            format: "fingerprint:%s %s",
        },
        rule! {
            // a=candidate:0 1 UDP 2113667327 203.0.113.1 54400 typ host
            // a=candidate:1162875081 1 udp 2113937151 192.168.34.75 60017 typ host generation 0 network-id 3 network-cost 10
            // a=candidate:3289912957 2 udp 1845501695 193.84.77.194 60017 typ srflx raddr 192.168.34.75 rport 60017 generation 0 ufrag 3Xk9 network-id 3
            // a=candidate:229815620 1 tcp 1518280447 192.168.150.19 60017 typ host tcptype active generation 0
            push: "candidates",
            reg: r"candidate:(\S*) (\d*) (\S*) (\d*) (\S*) (\d*) typ (\S*)(?: raddr (\S*) rport (\d*))?(?: tcptype (\S*))?(?: generation (\d*))?(?: ufrag (\S*))?(?: network-id (\d*))?(?: network-cost (\d*))?",
            names: [
                "foundation", "component", "transport", "priority", "ip", "port", "type", "raddr", "rport", "tcptype",
                "generation", "ufrag", "network-id", "network-cost",
            ],
            types: "sdsdsdssdsdsdd",
            format_fn: templates::candidate,
        },
        rule! {
            // a=end-of-candidates
            name: "endOfCandidates",
            reg: r"(end-of-candidates)",
        },
        rule! {
            // a=remote-candidates:1 203.0.113.1 54400 2 203.0.113.1 54401
            name: "remoteCandidates",
            reg: r"remote-candidates:(.*)",
            format: "remote-candidates:%s",
        },
        rule! {
            // a=ice-options:google-ice
            name: "iceOptions",
            reg: r"ice-options:(\S*)",
            format: "ice-options:%s",
        },
        rule! {
            // a=ssrc:2566107569 cname:t9YU8M1UxTF8Y1A1
            push: "ssrcs",
            reg: r"ssrc:(\d*) ([\w_-]*)(?::(.*))?",
            names: ["id", "attribute", "value"],
            types: "dss",
            format_fn: templates::ssrc,
        },
        rule! {
            // a=ssrc-group:FEC 1 2
            // a=ssrc-group:FEC-FR 3004364195 1080772241
            push: "ssrcGroups",
            reg: r"ssrc-group:([\x21\x23\x24\x25\x26\x27\x2A\x2B\x2D\x2E\w]*) (.*)",
            names: ["semantics", "ssrcs"],
            format: "ssrc-group:%s %s",
        },
        rule! {
            // a=msid-semantic: WMS Jvlam5X3SX1OP6pn20zWogvaKJz5Hjf9OnlV
            name: "msidSemantic",
            reg: r"msid-semantic:\s?(\w*) (\S*)",
            names: ["semantic", "token"],
            format: "msid-semantic: %s %s",
        },
        rule! {
            // a=group:BUNDLE audio video
            push: "groups",
            reg: r"group:(\w*) (.*)",
            names: ["type", "mids"],
            format: "group:%s %s",
        },
        rule! {
            // a=rtcp-mux
            name: "rtcpMux",
            reg: r"(rtcp-mux)",
        },
        rule! {
            // a=rtcp-rsize
            name: "rtcpRsize",
            reg: r"(rtcp-rsize)",
        },
        rule! {
            // a=sctpmap:5000 webrtc-datachannel 1024
            name: "sctpmap",
            reg: r"sctpmap:([\w_/]*) (\S*)(?: (\S*))?",
            names: ["sctpmapNumber", "app", "maxMessageSize"],
            types: "dsd",
            format_fn: templates::sctpmap,
        },
        rule! {
            // a=x-google-flag:conference
            name: "xGoogleFlag",
            reg: r"x-google-flag:([^\s]*)",
            format: "x-google-flag:%s",
        },
        rule! {
            // a=rid:1 send max-width=1280;max-height=720;max-fps=30;depend=0
            push: "rids",
            reg: r"rid:([\d\w]+) (\w+)(?: ([\S| ]*))?",
            names: ["id", "direction", "params"],
            format_fn: templates::rid,
        },
        rule! {
            // a=imageattr:97 send [x=800,y=640,sar=1.1,q=0.6] [x=480,y=320] recv [x=330,y=250]
            // a=imageattr:* send [x=800,y=640] recv *
            // a=imageattr:100 recv [x=320,y=240]
            push: "imageattrs",
            reg: r"imageattr:(\d+|\*)[\s\t]+(send|recv)[\s\t]+(\*|\[\S+\](?:[\s\t]+\[\S+\])*)(?:[\s\t]+(recv|send)[\s\t]+(\*|\[\S+\](?:[\s\t]+\[\S+\])*))?",
            names: ["pt", "dir1", "attrs1", "dir2", "attrs2"],
            format_fn: templates::imageattr,
        },
        rule! {
            // a=simulcast:send 1,2,3;~4,~5 recv 6;~7,~8
            // a=simulcast:recv 1;4,5 send 6;7
            name: "simulcast",
            reg: r"simulcast:(send|recv) ([a-zA-Z0-9\-_~;,]+)(?:\s?(send|recv) ([a-zA-Z0-9\-_~;,]+))?",
            names: ["dir1", "list1", "dir2", "list2"],
            format_fn: templates::simulcast,
        },
        rule! {
            // Draft 03 syntax:
            // a=simulcast: recv pt=97;98 send pt=97
            // a=simulcast: send rid=5;6;7 paused=6,7
            name: "simulcast_03",
            reg: r"simulcast:[\s\t]+([\S+\s\t]+)",
            names: ["value"],
            format: "simulcast: %s",
        },
        rule! {
            // a=framerate:25
            // a=framerate:29.97
            name: "framerate",
            reg: r"framerate:(\d+(?:$|\.\d+))",
            types: "f",
            format: "framerate:%s",
        },
        rule! {
            // RFC 4570
            // a=source-filter: incl IN IP4 239.5.2.31 10.1.15.5
            name: "sourceFilter",
            reg: r"source-filter: *(excl|incl) (\S*) (IP4|IP6|\*) (\S*) (.*)",
            names: ["filterMode", "netType", "addressTypes", "destAddress", "srcList"],
            format: "source-filter: %s %s %s %s %s",
        },
        rule! {
            // a=bundle-only
            name: "bundleOnly",
            reg: r"(bundle-only)",
        },
        rule! {
            // a=label:1
            name: "label",
            reg: r"label:(.+)",
            format: "label:%s",
        },
        rule! {
            // a=sctp-port:5000
            name: "sctpPort",
            reg: r"sctp-port:(\d+)",
            types: "d",
            format: "sctp-port:%s",
        },
        rule! {
            // a=max-message-size:262144
            name: "maxMessageSize",
            reg: r"max-message-size:(\d+)",
            types: "d",
            format: "max-message-size:%s",
        },
        rule! {
            // RFC 7273
            // a=ts-refclk:ptp=IEEE1588-2008:39-A7-94-FF-FE-07-CB-D0:37
            push: "tsRefClocks",
            reg: r"ts-refclk:([^\s=]*)(?:=(\S*))?",
            names: ["clksrc", "clksrcExt"],
            format_fn: templates::ts_refclk,
        },
        rule! {
            // RFC 7273
            // a=mediaclk:direct=963214424
            name: "mediaClk",
            reg: r"mediaclk:(?:id=(\S*))? *([^\s=]*)(?:=(\S*))?(?: *rate=(\d+)/(\d+))?",
            names: ["id", "mediaClockName", "mediaClockValue", "rateNumerator", "rateDenominator"],
            types: "sssdd",
            format_fn: templates::mediaclk,
        },
        rule! {
            // a=keywds:keywords
            name: "keywords",
            reg: r"keywds:(.+)",
            format: "keywds:%s",
        },
        rule! {
            // a=content:main
            name: "content",
            reg: r"content:(.+)",
            format: "content:%s",
        },
        // BFCP (RFC 4583)
        rule! {
            // a=floorctrl:c-s
            name: "bfcpFloorCtrl",
            reg: r"floorctrl:(c-only|s-only|c-s)",
            format: "floorctrl:%s",
        },
        rule! {
            // a=confid:1
            name: "bfcpConfId",
            reg: r"confid:(\d+)",
            types: "d",
            format: "confid:%s",
        },
        rule! {
            // a=userid:1
            name: "bfcpUserId",
            reg: r"userid:(\d+)",
            types: "d",
            format: "userid:%s",
        },
        rule! {
            // a=floorid:1 mstrm:2
            name: "bfcpFloorId",
            reg: r"floorid:(.+) (?:m-stream|mstrm):(.+)",
            names: ["id", "mStream"],
            format: "floorid:%s mstrm:%s",
        },
        rule! {
            // Any a= line not understood above is kept verbatim.
            push: "invalid",
            names: ["value"],
        },
    ]
}
